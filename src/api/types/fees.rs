//! Fee estimation types for the Meridian node API.

use serde::{Deserialize, Serialize};

use crate::api::types::order::OrderSubmission;

/// Request for POST /orders/fee/estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateFeeRequest {
    /// The hypothetical order to estimate fees for; it is never placed
    pub order: OrderSubmission,
}

/// Per-component fee breakdown, in scaled units of the settlement asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBreakdown {
    #[serde(rename = "makerFee")]
    pub maker_fee: String,
    #[serde(rename = "infrastructureFee")]
    pub infrastructure_fee: String,
    #[serde(rename = "liquidityFee")]
    pub liquidity_fee: String,
}

/// Response for POST /orders/fee/estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub fee: FeeBreakdown,
    #[serde(rename = "totalFeeAmount")]
    pub total_fee_amount: String,
}
