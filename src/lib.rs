//! # Meridian Rust SDK
//!
//! A Rust SDK for interacting with the Meridian trading network.
//!
//! ## Modules
//!
//! This SDK provides four main modules:
//! - [`wallet`]: wallet service client (login, key listing, signing)
//! - [`api`]: node API client for markets, fees, transaction preparation
//!   and lookups
//! - [`governance`]: new-market proposal flow (propose, vote, enactment)
//! - [`orders`]: order lifecycle flow (submit, amend, cancel)
//!
//! Plus two supporting modules:
//! - [`config`]: environment configuration with pure validation
//! - [`shared`]: serde helpers for the wire format
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use meridian::api::NodeClient;
//! use meridian::config::Config;
//! use meridian::wallet::WalletClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!
//!     let mut wallet = WalletClient::new(config.wallet_server_url.as_str())?;
//!     wallet.login(&config.wallet_name, &config.wallet_passphrase).await?;
//!     let pubkey = wallet.first_key().await?;
//!
//!     let node = NodeClient::new(config.node_url_rest.as_str())?;
//!     let markets = node.list_markets().await?;
//!     println!("Found {} markets, acting as {}", markets.len(), pubkey);
//!
//!     Ok(())
//! }
//! ```
//!
//! The runnable flows under `demos/` cover fee estimation, the market
//! proposal/voting flow, and the full order lifecycle.

// ============================================================================
// MODULES
// ============================================================================

/// Node API client module for markets, fees, transaction preparation and
/// lookups.
pub mod api;

/// Environment configuration with pure validation.
pub mod config;

/// New-market governance flow: propose, watch, vote, wait for enactment.
pub mod governance;

/// Order lifecycle flow: submit, amend, cancel with confirmation
/// read-backs.
pub mod orders;

/// Shared serde helpers for the wire format.
pub mod shared;

/// Wallet service client for login, key listing and signing.
pub mod wallet;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use meridian::prelude::*;
/// ```
pub mod prelude {
    // API module exports
    pub use crate::api::{
        // Common types
        EstimateFeeRequest, FeeBreakdown, FeeEstimate,
        GovernanceData, Market, MarketsResponse,
        NewMarket, NewMarketConfiguration,
        NodeClient, NodeClientBuilder, NodeError, NodeResult,
        Order, OrderAmendment, OrderCancellation, OrderStatus, OrderSubmission, OrderType,
        PreparedTransaction, Price, Proposal, ProposalRejectionReason, ProposalState,
        ProposalTerms, Side, TimeInForce, Vote, VoteValue,
    };

    // Configuration exports
    pub use crate::config::{Config, ConfigError, MarketsSource};

    // Governance flow exports
    pub use crate::governance::{
        collect_proposal_ids, generate_reference, propose_markets, run_new_market_flow,
        vote_on_proposals, wait_for_enactment, GovernanceError, PollConfig, ProposedMarket,
    };

    // Order flow exports
    pub use crate::orders::{
        amend_order, cancel_orders, submit_order, AmendedOrder, CancellationScope,
        LifecycleConfig, OrderError, SubmittedOrder,
    };

    // Wallet exports
    pub use crate::wallet::{
        SignedTransaction, TransactionSignature, WalletClient, WalletError, WalletResult,
    };
}
