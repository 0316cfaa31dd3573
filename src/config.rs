//! Environment configuration for the automation flows.
//!
//! All remote endpoints and wallet credentials come from the environment.
//! Validation is pure: [`Config::from_env`] returns a [`ConfigError`]
//! instead of touching the process, and nothing here performs a network
//! call, so a bad value is caught before the first request is made.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::api::types::Market;

/// Node REST endpoint (markets, fee estimation).
pub const ENV_NODE_URL_REST: &str = "NODE_URL_REST";
/// Node gateway address (transaction preparation, lookups); `host:port` or
/// a full URL.
pub const ENV_NODE_URL_GRPC: &str = "NODE_URL_GRPC";
/// Wallet service base URL.
pub const ENV_WALLETSERVER_URL: &str = "WALLETSERVER_URL";
/// Wallet name.
pub const ENV_WALLET_NAME: &str = "WALLET_NAME";
/// Wallet passphrase.
pub const ENV_WALLET_PASSPHRASE: &str = "WALLET_PASSPHRASE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required value absent or empty
    #[error("missing or empty {name}")]
    Missing { name: String },

    /// Value present but not a usable http(s) URL
    #[error("{name} is not a valid URL: {value:?}")]
    InvalidUrl { name: String, value: String },

    /// Markets file could not be read
    #[error("failed to read markets file: {0}")]
    Io(#[from] std::io::Error),

    /// Markets URL could not be fetched
    #[error("failed to fetch markets: {0}")]
    Http(#[from] reqwest::Error),

    /// Markets payload was not a market list
    #[error("invalid markets JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Resolved endpoint and credential configuration, built once at startup
/// and passed to the flows.
#[derive(Debug, Clone)]
pub struct Config {
    /// Node REST endpoint
    pub node_url_rest: Url,
    /// Node gateway address for transaction preparation
    pub node_url_grpc: String,
    /// Wallet service base URL
    pub wallet_server_url: Url,
    pub wallet_name: String,
    pub wallet_passphrase: String,
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            node_url_rest: require_url(ENV_NODE_URL_REST, lookup(ENV_NODE_URL_REST))?,
            node_url_grpc: require(ENV_NODE_URL_GRPC, lookup(ENV_NODE_URL_GRPC))?,
            wallet_server_url: require_url(ENV_WALLETSERVER_URL, lookup(ENV_WALLETSERVER_URL))?,
            wallet_name: require(ENV_WALLET_NAME, lookup(ENV_WALLET_NAME))?,
            wallet_passphrase: require(ENV_WALLET_PASSPHRASE, lookup(ENV_WALLET_PASSPHRASE))?,
        })
    }
}

/// Require a non-empty value.
fn require(name: &str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing {
            name: name.to_string(),
        }),
    }
}

/// Require a well-formed http(s) URL.
fn require_url(name: &str, value: Option<String>) -> Result<Url, ConfigError> {
    let raw = require(name, value)?;
    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigError::InvalidUrl {
            name: name.to_string(),
            value: raw,
        }),
    }
}

/// Where market definitions come from: a local JSON file or a node's
/// markets endpoint. Resolved explicitly before use so the two cases never
/// share a code path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketsSource {
    FilePath(PathBuf),
    RemoteUrl(Url),
}

/// Markets payloads come either as a bare array or wrapped in an object
/// with a `markets` key (the node listing format).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MarketsPayload {
    List(Vec<Market>),
    Wrapped { markets: Vec<Market> },
}

impl MarketsSource {
    /// Classify a raw `--markets` argument.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Err(ConfigError::Missing {
                name: "markets".to_string(),
            });
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw).map_err(|_| ConfigError::InvalidUrl {
                name: "markets".to_string(),
                value: raw.to_string(),
            })?;
            Ok(MarketsSource::RemoteUrl(url))
        } else {
            Ok(MarketsSource::FilePath(PathBuf::from(raw)))
        }
    }

    /// Load and decode the market definitions.
    pub async fn load(&self) -> Result<Vec<Market>, ConfigError> {
        let payload = match self {
            MarketsSource::FilePath(path) => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str::<MarketsPayload>(&text)?
            }
            MarketsSource::RemoteUrl(url) => {
                reqwest::get(url.clone())
                    .await?
                    .error_for_status()?
                    .json::<MarketsPayload>()
                    .await?
            }
        };

        Ok(match payload {
            MarketsPayload::List(markets) => markets,
            MarketsPayload::Wrapped { markets } => markets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write as _;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_NODE_URL_REST, "https://node.example.com"),
            (ENV_NODE_URL_GRPC, "node.example.com:3002"),
            (ENV_WALLETSERVER_URL, "https://wallet.example.com"),
            (ENV_WALLET_NAME, "trader"),
            (ENV_WALLET_PASSPHRASE, "hunter2"),
        ])
    }

    fn config_from(env: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_vars(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_full_environment_accepted() {
        let config = config_from(&full_env()).unwrap();
        assert_eq!(config.node_url_rest.as_str(), "https://node.example.com/");
        assert_eq!(config.node_url_grpc, "node.example.com:3002");
        assert_eq!(config.wallet_name, "trader");
    }

    #[test]
    fn test_missing_variable_rejected() {
        for name in [
            ENV_NODE_URL_REST,
            ENV_NODE_URL_GRPC,
            ENV_WALLETSERVER_URL,
            ENV_WALLET_NAME,
            ENV_WALLET_PASSPHRASE,
        ] {
            let mut env = full_env();
            env.remove(name);
            let err = config_from(&env).unwrap_err();
            assert!(
                matches!(&err, ConfigError::Missing { name: n } if n.as_str() == name),
                "expected Missing for {name}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_variable_rejected() {
        let mut env = full_env();
        env.insert(ENV_WALLET_NAME, "   ");
        assert!(matches!(
            config_from(&env),
            Err(ConfigError::Missing { .. })
        ));
    }

    #[test]
    fn test_malformed_url_rejected() {
        let mut env = full_env();
        env.insert(ENV_WALLETSERVER_URL, "not a url");
        let err = config_from(&env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { name, .. } if name == ENV_WALLETSERVER_URL));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut env = full_env();
        env.insert(ENV_NODE_URL_REST, "ftp://node.example.com");
        assert!(matches!(
            config_from(&env),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_markets_source_classification() {
        assert_eq!(
            MarketsSource::parse("https://node.example.com/markets").unwrap(),
            MarketsSource::RemoteUrl(Url::parse("https://node.example.com/markets").unwrap())
        );
        assert_eq!(
            MarketsSource::parse("markets.json").unwrap(),
            MarketsSource::FilePath(PathBuf::from("markets.json"))
        );
        assert!(matches!(
            MarketsSource::parse(""),
            Err(ConfigError::Missing { .. })
        ));
    }

    const MARKET_JSON: &str = r#"{
        "id": "",
        "tradableInstrument": {
            "instrument": {
                "name": "December 2026 ETH vs USD future",
                "code": "ETHUSD/DEC26",
                "baseName": "ETH",
                "quoteName": "USD",
                "future": {"asset": "USD", "maturity": "2026-12-31T23:59:59Z"}
            },
            "logNormalRiskModel": {
                "riskAversionParameter": 0.01,
                "tau": 0.00011407711613050422,
                "params": {"mu": 0.0, "r": 0.016, "sigma": 1.5}
            }
        },
        "decimalPlaces": "5",
        "continuous": {"tickSize": "1"}
    }"#;

    #[tokio::test]
    async fn test_load_markets_from_bare_array_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{}]", MARKET_JSON).unwrap();

        let source = MarketsSource::FilePath(file.path().to_path_buf());
        let markets = source.load().await.unwrap();
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].tradable_instrument.instrument.code, "ETHUSD/DEC26");
        assert_eq!(markets[0].decimal_places, 5);
    }

    #[tokio::test]
    async fn test_load_markets_from_wrapped_object_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"markets": [{}]}}"#, MARKET_JSON).unwrap();

        let source = MarketsSource::FilePath(file.path().to_path_buf());
        let markets = source.load().await.unwrap();
        assert_eq!(markets.len(), 1);
    }

    #[tokio::test]
    async fn test_load_markets_rejects_non_market_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"unexpected": true}}"#).unwrap();

        let source = MarketsSource::FilePath(file.path().to_path_buf());
        assert!(matches!(
            source.load().await,
            Err(ConfigError::Parse(_))
        ));
    }
}
