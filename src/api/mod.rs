//! Node API client module for Meridian.
//!
//! This module provides a type-safe HTTP client for the node's
//! request/response endpoints: markets, chain time, fee estimation,
//! transaction preparation, and order/proposal lookups.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use meridian::api::NodeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let node = NodeClient::new("https://node.example.com")?;
//!
//!     let markets = node.list_markets().await?;
//!     println!("Found {} markets", markets.len());
//!
//!     let time = node.blockchain_time().await?;
//!     println!("Chain time: {} ns", time);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All methods return `NodeResult<T>`, an alias for `Result<T, NodeError>`.
//! Any non-success response surfaces as [`NodeError::Status`] carrying the
//! HTTP status and raw body; there are no retries.

pub mod client;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::{NodeClient, NodeClientBuilder};
pub use error::{NodeError, NodeResult};
pub use types::*;
