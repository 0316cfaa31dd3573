//! Market types for the Meridian node API.
//!
//! The same instrument and risk-model shapes appear both in the live market
//! listing and inside new-market governance proposals, so they are defined
//! once here and reused by the governance types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::string_u64;

/// Future product backing an instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureProduct {
    /// Settlement asset
    pub asset: String,
    /// Maturity timestamp (RFC 3339 on the wire)
    pub maturity: DateTime<Utc>,
}

/// Instrument metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub code: String,
    #[serde(rename = "baseName")]
    pub base_name: String,
    #[serde(rename = "quoteName")]
    pub quote_name: String,
    pub future: FutureProduct,
}

/// Parameters of the log-normal risk model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogNormalModelParams {
    pub mu: f64,
    pub r: f64,
    pub sigma: f64,
}

/// Log-normal risk model attached to a market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogNormalRiskModel {
    #[serde(rename = "riskAversionParameter")]
    pub risk_aversion_parameter: f64,
    pub tau: f64,
    pub params: LogNormalModelParams,
}

/// Instrument plus the risk model it trades under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradableInstrument {
    pub instrument: Instrument,
    #[serde(rename = "logNormalRiskModel")]
    pub log_normal_risk_model: LogNormalRiskModel,
}

/// Continuous trading mode parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousTrading {
    #[serde(rename = "tickSize")]
    pub tick_size: String,
}

/// A market definition, as listed by the node or loaded from a markets file.
///
/// Definitions loaded from a file may not be enacted yet, in which case `id`
/// is empty. `reference` is an optional operator-supplied correlation
/// reference carried in market files; when absent the proposal flow
/// generates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "tradableInstrument")]
    pub tradable_instrument: TradableInstrument,
    #[serde(rename = "decimalPlaces", with = "string_u64")]
    pub decimal_places: u64,
    pub continuous: ContinuousTrading,
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Response for GET /markets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketsResponse {
    pub markets: Vec<Market>,
}
