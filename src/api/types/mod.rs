//! Request and response types for the Meridian node API, organized by
//! category.

pub mod chain;
pub mod fees;
pub mod governance;
pub mod market;
pub mod order;

// Re-export all types for convenience
pub use chain::*;
pub use fees::*;
pub use governance::*;
pub use market::*;
pub use order::*;
