//! Order-related types for the Meridian node API.

use serde::{Deserialize, Serialize};

use crate::shared::{base64_bytes, i64_is_zero, string_i64, string_u64};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy the base asset
    #[serde(rename = "SIDE_BUY")]
    Buy,
    /// Sell the base asset
    #[serde(rename = "SIDE_SELL")]
    Sell,
}

impl Side {
    /// Wire name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "SIDE_BUY",
            Side::Sell => "SIDE_SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-in-force for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good 'til cancelled
    #[serde(rename = "TIF_GTC")]
    Gtc,
    /// Good 'til time (requires `expires_at`)
    #[serde(rename = "TIF_GTT")]
    Gtt,
    /// Immediate or cancel
    #[serde(rename = "TIF_IOC")]
    Ioc,
    /// Fill or kill
    #[serde(rename = "TIF_FOK")]
    Fok,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "TIF_GTC",
            TimeInForce::Gtt => "TIF_GTT",
            TimeInForce::Ioc => "TIF_IOC",
            TimeInForce::Fok => "TIF_FOK",
        }
    }
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "TYPE_LIMIT")]
    Limit,
    #[serde(rename = "TYPE_MARKET")]
    Market,
    /// Order created by the network (liquidations, distressed positions)
    #[serde(rename = "TYPE_NETWORK")]
    Network,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "TYPE_LIMIT",
            OrderType::Market => "TYPE_MARKET",
            OrderType::Network => "TYPE_NETWORK",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "STATUS_ACTIVE")]
    Active,
    #[serde(rename = "STATUS_EXPIRED")]
    Expired,
    #[serde(rename = "STATUS_CANCELLED")]
    Cancelled,
    #[serde(rename = "STATUS_STOPPED")]
    Stopped,
    #[serde(rename = "STATUS_FILLED")]
    Filled,
    #[serde(rename = "STATUS_REJECTED")]
    Rejected,
    #[serde(rename = "STATUS_PARTIALLY_FILLED")]
    PartiallyFilled,
    /// Parked out of the book (auction entry, price monitoring)
    #[serde(rename = "STATUS_PARKED")]
    Parked,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "STATUS_ACTIVE",
            OrderStatus::Expired => "STATUS_EXPIRED",
            OrderStatus::Cancelled => "STATUS_CANCELLED",
            OrderStatus::Stopped => "STATUS_STOPPED",
            OrderStatus::Filled => "STATUS_FILLED",
            OrderStatus::Rejected => "STATUS_REJECTED",
            OrderStatus::PartiallyFilled => "STATUS_PARTIALLY_FILLED",
            OrderStatus::Parked => "STATUS_PARKED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New-order request, embedded in POST /orders/prepare/submit and
/// POST /orders/fee/estimate.
///
/// Prices are integers scaled by the market's decimal places: with 5
/// decimals, a price of `123456` means 1.23456.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    /// Market to place the order on
    #[serde(rename = "marketID")]
    pub market_id: String,
    /// Party placing the order (public key)
    #[serde(rename = "partyID")]
    pub party_id: String,
    /// Scaled price
    #[serde(with = "string_u64")]
    pub price: u64,
    /// Order size in contracts
    #[serde(with = "string_u64")]
    pub size: u64,
    pub side: Side,
    #[serde(rename = "timeInForce")]
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Expiry in nanoseconds since epoch; only meaningful for GTT
    #[serde(
        rename = "expiresAt",
        with = "string_i64",
        default,
        skip_serializing_if = "i64_is_zero"
    )]
    pub expires_at: i64,
}

/// Scaled price wrapper used by amendments, so that "unchanged" can be
/// expressed by omitting the field entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    #[serde(with = "string_u64")]
    pub value: u64,
}

/// Amendment request, embedded in POST /orders/prepare/amend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAmendment {
    #[serde(rename = "marketID")]
    pub market_id: String,
    #[serde(rename = "partyID")]
    pub party_id: String,
    /// Order being amended (node-assigned identifier)
    #[serde(rename = "orderID")]
    pub order_id: String,
    /// New price, if changing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// New time-in-force, if changing
    #[serde(rename = "timeInForce", default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
}

/// Cancellation request, embedded in POST /orders/prepare/cancel.
///
/// The set of populated identifier fields selects the scope: party + market
/// + order cancels one order, party + market cancels every order on that
/// market, party alone cancels everything the party has open. Build this via
/// [`CancellationScope`](crate::orders::CancellationScope) rather than by
/// hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCancellation {
    #[serde(rename = "partyID")]
    pub party_id: String,
    #[serde(rename = "marketID", default, skip_serializing_if = "Option::is_none")]
    pub market_id: Option<String>,
    #[serde(rename = "orderID", default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// A confirmed order record as read back from the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Node-assigned identifier
    pub id: String,
    #[serde(rename = "marketID")]
    pub market_id: String,
    #[serde(rename = "partyID")]
    pub party_id: String,
    #[serde(with = "string_u64")]
    pub price: u64,
    #[serde(with = "string_u64")]
    pub size: u64,
    /// Unfilled remainder
    #[serde(with = "string_u64", default)]
    pub remaining: u64,
    pub side: Side,
    #[serde(rename = "timeInForce")]
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Client-generated correlation reference
    #[serde(default)]
    pub reference: String,
    #[serde(rename = "expiresAt", with = "string_i64", default)]
    pub expires_at: i64,
    #[serde(rename = "createdAt", with = "string_i64", default)]
    pub created_at: i64,
}

/// An unsigned transaction returned by the prepare endpoints, ready to be
/// signed by the wallet service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedTransaction {
    /// Raw transaction payload (base64 on the wire)
    #[serde(with = "base64_bytes")]
    pub blob: Vec<u8>,
    /// Client reference for looking the transaction up once confirmed;
    /// only populated by prepare/submit
    #[serde(rename = "submitID", default, skip_serializing_if = "Option::is_none")]
    pub submit_id: Option<String>,
}

/// Request for POST /orders/prepare/submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareSubmitOrderRequest {
    pub submission: OrderSubmission,
}

/// Request for POST /orders/prepare/amend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareAmendOrderRequest {
    pub amendment: OrderAmendment,
}

/// Request for POST /orders/prepare/cancel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareCancelOrderRequest {
    pub cancellation: OrderCancellation,
}

/// Response for GET /orders/{id} and GET /orders/reference/{reference}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: Order,
}
