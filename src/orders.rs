//! Order lifecycle driver: submit, amend, cancel, each with a confirmation
//! read-back.
//!
//! Every transition follows the same shape: ask the node to prepare an
//! unsigned transaction, hand the blob to the wallet service for signing
//! and broadcast, wait a fixed interval for the transaction to land in a
//! block, then read the order back to confirm the result. There is no
//! active polling here; the wait is a single fixed sleep.

use std::time::Duration;

use thiserror::Error;

use crate::api::types::{Order, OrderAmendment, OrderCancellation, OrderSubmission};
use crate::api::{NodeClient, NodeError};
use crate::wallet::{WalletClient, WalletError};

/// Order lifecycle errors.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The prepare endpoint did not assign a submission reference
    #[error("prepared transaction carries no submission reference")]
    MissingReference,
}

/// Timing for the lifecycle steps.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// How long to wait after broadcasting before reading the order back
    pub confirmation_wait: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            confirmation_wait: Duration::from_secs(4),
        }
    }
}

/// Which orders a cancellation covers. The three scopes are mutually
/// exclusive and chosen up front, not branched at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancellationScope {
    /// One order on one market
    Single { market_id: String, order_id: String },
    /// Every order the party has on one market
    Market { market_id: String },
    /// Every order the party has, on every market: the broadest scope,
    /// expressed on the wire by setting only the party
    AllMarkets,
}

impl CancellationScope {
    /// Build the wire-level cancellation for a party.
    pub fn into_cancellation(self, party: &str) -> OrderCancellation {
        match self {
            CancellationScope::Single {
                market_id,
                order_id,
            } => OrderCancellation {
                party_id: party.to_string(),
                market_id: Some(market_id),
                order_id: Some(order_id),
            },
            CancellationScope::Market { market_id } => OrderCancellation {
                party_id: party.to_string(),
                market_id: Some(market_id),
                order_id: None,
            },
            CancellationScope::AllMarkets => OrderCancellation {
                party_id: party.to_string(),
                market_id: None,
                order_id: None,
            },
        }
    }
}

/// A submitted order together with the reference that tracks it.
#[derive(Debug, Clone)]
pub struct SubmittedOrder {
    /// Client reference assigned at preparation time
    pub reference: String,
    /// The confirmed order record
    pub order: Order,
}

/// Before/after view of an amended order.
#[derive(Debug, Clone)]
pub struct AmendedOrder {
    pub previous: Order,
    pub current: Order,
}

impl std::fmt::Display for AmendedOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Status: {}, Price(Old): {}, Price(New): {}, \
             Size(Old): {}, Size(New): {}, TimeInForce(Old): {}, TimeInForce(New): {}",
            self.current.id,
            self.current.status,
            self.previous.price,
            self.current.price,
            self.previous.size,
            self.current.size,
            self.previous.time_in_force,
            self.current.time_in_force,
        )
    }
}

/// Expiry timestamp for a GTT order: chain time plus the order lifetime,
/// in nanoseconds.
pub fn expires_at(chain_time_nanos: i64, lifetime: Duration) -> i64 {
    chain_time_nanos + lifetime.as_nanos() as i64
}

/// Submit a limit order and confirm it by reference.
pub async fn submit_order(
    node: &NodeClient,
    wallet: &WalletClient,
    submission: &OrderSubmission,
    config: &LifecycleConfig,
) -> Result<SubmittedOrder, OrderError> {
    let prepared = node.prepare_submit_order(submission).await?;
    let reference = prepared.submit_id.clone().ok_or(OrderError::MissingReference)?;

    wallet
        .sign_blob(&prepared.blob, &submission.party_id, true)
        .await?;
    tracing::info!(reference = %reference, "order signed and sent");

    tokio::time::sleep(config.confirmation_wait).await;

    let order = node.order_by_reference(&reference).await?;
    tracing::info!(order_id = %order.id, status = %order.status, "order confirmed");

    Ok(SubmittedOrder { reference, order })
}

/// Amend an existing order and confirm it by id.
///
/// `previous` is the pre-amendment record (typically the confirmation from
/// [`submit_order`]), kept so callers can report the old and new values
/// side by side.
pub async fn amend_order(
    node: &NodeClient,
    wallet: &WalletClient,
    previous: &Order,
    amendment: &OrderAmendment,
    config: &LifecycleConfig,
) -> Result<AmendedOrder, OrderError> {
    let prepared = node.prepare_amend_order(amendment).await?;
    wallet
        .sign_blob(&prepared.blob, &amendment.party_id, true)
        .await?;
    tracing::info!(order_id = %amendment.order_id, "amendment signed and sent");

    tokio::time::sleep(config.confirmation_wait).await;

    let current = node.order_by_id(&amendment.order_id).await?;
    tracing::info!(order_id = %current.id, status = %current.status, "amendment confirmed");

    Ok(AmendedOrder {
        previous: previous.clone(),
        current,
    })
}

/// Cancel orders in the given scope and confirm via the reference of an
/// order expected to be cancelled.
pub async fn cancel_orders(
    node: &NodeClient,
    wallet: &WalletClient,
    party: &str,
    scope: CancellationScope,
    reference: &str,
    config: &LifecycleConfig,
) -> Result<Order, OrderError> {
    let cancellation = scope.into_cancellation(party);

    let prepared = node.prepare_cancel_order(&cancellation).await?;
    wallet.sign_blob(&prepared.blob, party, true).await?;
    tracing::info!("cancellation signed and sent");

    tokio::time::sleep(config.confirmation_wait).await;

    let order = node.order_by_reference(reference).await?;
    tracing::info!(order_id = %order.id, status = %order.status, "cancellation confirmed");

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{OrderStatus, OrderType, Side, TimeInForce};

    #[test]
    fn test_single_scope_sets_all_identifiers() {
        let cancellation = CancellationScope::Single {
            market_id: "MKT".to_string(),
            order_id: "ORD".to_string(),
        }
        .into_cancellation("PARTY");

        assert_eq!(cancellation.party_id, "PARTY");
        assert_eq!(cancellation.market_id.as_deref(), Some("MKT"));
        assert_eq!(cancellation.order_id.as_deref(), Some("ORD"));
    }

    #[test]
    fn test_market_scope_omits_order_id() {
        let cancellation = CancellationScope::Market {
            market_id: "MKT".to_string(),
        }
        .into_cancellation("PARTY");

        assert_eq!(cancellation.market_id.as_deref(), Some("MKT"));
        assert!(cancellation.order_id.is_none());
    }

    #[test]
    fn test_all_markets_scope_is_party_only_on_the_wire() {
        let cancellation = CancellationScope::AllMarkets.into_cancellation("PARTY");

        assert!(cancellation.market_id.is_none());
        assert!(cancellation.order_id.is_none());

        let wire = serde_json::to_value(&cancellation).unwrap();
        let object = wire.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["partyID"], "PARTY");
    }

    #[test]
    fn test_expires_at_adds_lifetime_in_nanos() {
        let chain_time = 1_600_000_000_000_000_000;
        assert_eq!(
            expires_at(chain_time, Duration::from_secs(120)),
            chain_time + 120_000_000_000
        );
    }

    #[test]
    fn test_lifecycle_default_confirmation_wait() {
        assert_eq!(
            LifecycleConfig::default().confirmation_wait,
            Duration::from_secs(4)
        );
    }

    fn order(price: u64) -> Order {
        Order {
            id: "O-1".to_string(),
            market_id: "MKT".to_string(),
            party_id: "PARTY".to_string(),
            price,
            size: 10,
            remaining: 10,
            side: Side::Buy,
            time_in_force: TimeInForce::Gtc,
            order_type: OrderType::Limit,
            status: OrderStatus::Active,
            reference: "ref".to_string(),
            expires_at: 0,
            created_at: 0,
        }
    }

    #[test]
    fn test_amended_order_reports_old_and_new_price() {
        let amended = AmendedOrder {
            previous: order(1),
            current: order(2),
        };

        let summary = amended.to_string();
        assert!(summary.contains("Price(Old): 1"));
        assert!(summary.contains("Price(New): 2"));
    }
}
