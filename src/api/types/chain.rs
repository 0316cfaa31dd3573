//! Chain time types for the Meridian node API.

use serde::{Deserialize, Serialize};

use crate::shared::string_i64;

/// Response for GET /time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeResponse {
    /// Current chain time in nanoseconds since epoch
    #[serde(with = "string_i64")]
    pub timestamp: i64,
}
