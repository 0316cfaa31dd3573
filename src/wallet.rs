//! Wallet service client adapter.
//!
//! The wallet service owns key management and transaction signing; this
//! module only drives its REST API.
//!
//! # Session Flow
//!
//! 1. POST credentials to the token endpoint
//! 2. Keep the returned bearer token for the life of the process
//! 3. List keypairs and pick the public key to act as
//! 4. Send prepared transaction blobs to be signed (and, with
//!    `propagate`, broadcast to the network)

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wallet request timeout.
const WALLET_TIMEOUT: Duration = Duration::from_secs(10);

/// Wallet-specific errors.
///
/// Login and key-listing failures carry the HTTP status and raw body so the
/// operator can see exactly what the service rejected.
#[derive(Debug, Error)]
pub enum WalletError {
    /// HTTP/network error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The wallet service rejected the login
    #[error("wallet login failed: HTTP {status} {body}")]
    LoginFailed { status: u16, body: String },

    /// The wallet service rejected the key listing
    #[error("wallet key listing failed: HTTP {status} {body}")]
    KeyListFailed { status: u16, body: String },

    /// The wallet exists but holds no keypairs
    #[error("wallet {wallet} has no keypairs")]
    NoKeys { wallet: String },

    /// The wallet service rejected the signing request
    #[error("transaction signing failed: HTTP {status} {body}")]
    SigningFailed { status: u16, body: String },

    /// An authenticated call was made before login
    #[error("not logged in to the wallet service")]
    NotLoggedIn,

    /// JSON deserialization error
    #[error("failed to deserialize wallet response: {0}")]
    Deserialize(String),
}

/// Result type alias for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    wallet: &'a str,
    passphrase: &'a str,
}

/// Response from the login endpoint.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// One keypair entry from the key listing.
#[derive(Debug, Clone, Deserialize)]
struct Keypair {
    #[serde(rename = "pub")]
    public: String,
}

/// Response from the key listing endpoint.
#[derive(Debug, Deserialize)]
struct ListKeysResponse {
    keys: Vec<Keypair>,
}

/// Request body for the signing endpoint.
#[derive(Debug, Serialize)]
struct SignRequest<'a> {
    tx: &'a str,
    #[serde(rename = "pubKey")]
    pub_key: &'a str,
    propagate: bool,
}

/// Signature attached to a signed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSignature {
    /// Signature bytes, base64
    pub sig: String,
    /// Signature algorithm
    pub algo: String,
    pub version: u32,
}

/// A signed transaction returned by the wallet service.
///
/// With `propagate=true` the service has already broadcast it; the value is
/// returned for logging and correlation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Signed payload, base64
    pub tx: String,
    pub sig: TransactionSignature,
}

/// Response from the signing endpoint.
#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedTx")]
    signed_tx: SignedTransaction,
}

/// Client for the wallet service REST API.
///
/// Holds the session token obtained by [`login`](WalletClient::login); the
/// token is attached as a bearer credential to every subsequent call and is
/// dropped with the client at process exit.
#[derive(Debug, Clone)]
pub struct WalletClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
    wallet_name: Option<String>,
}

impl WalletClient {
    /// Create a new client for the wallet service at `base_url`.
    ///
    /// A mistakenly-included `/api/v1` suffix is stripped, since every
    /// method appends the full path itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> WalletResult<Self> {
        let http_client = Client::builder().timeout(WALLET_TIMEOUT).build()?;
        Ok(Self {
            http_client,
            base_url: normalize_wallet_url(&base_url.into()),
            token: None,
            wallet_name: None,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether a session token is held.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Log in to an existing wallet and store the session token.
    pub async fn login(&mut self, name: &str, passphrase: &str) -> WalletResult<()> {
        let url = format!("{}/api/v1/auth/token", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&LoginRequest {
                wallet: name,
                passphrase,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::LoginFailed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Deserialize(e.to_string()))?;

        tracing::debug!(wallet = name, "logged in to wallet service");
        self.token = Some(login.token);
        self.wallet_name = Some(name.to_string());
        Ok(())
    }

    /// List the public keys held by the logged-in wallet, in service order.
    ///
    /// An empty listing is an error: nothing can be signed without a key.
    pub async fn list_keys(&self) -> WalletResult<Vec<String>> {
        let token = self.token.as_deref().ok_or(WalletError::NotLoggedIn)?;

        let url = format!("{}/api/v1/keys", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::KeyListFailed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let listing: ListKeysResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Deserialize(e.to_string()))?;

        if listing.keys.is_empty() {
            return Err(WalletError::NoKeys {
                wallet: self.wallet_name.clone().unwrap_or_default(),
            });
        }

        Ok(listing.keys.into_iter().map(|k| k.public).collect())
    }

    /// Convenience: the first public key of the wallet.
    pub async fn first_key(&self) -> WalletResult<String> {
        let mut keys = self.list_keys().await?;
        Ok(keys.remove(0))
    }

    /// Sign a base64-encoded transaction blob with the given key.
    ///
    /// With `propagate=true` the wallet service also broadcasts the signed
    /// transaction to the network.
    pub async fn sign_transaction(
        &self,
        blob_b64: &str,
        pubkey: &str,
        propagate: bool,
    ) -> WalletResult<SignedTransaction> {
        let token = self.token.as_deref().ok_or(WalletError::NotLoggedIn)?;

        let url = format!("{}/api/v1/messages", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&SignRequest {
                tx: blob_b64,
                pub_key: pubkey,
                propagate,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::SigningFailed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Deserialize(e.to_string()))?;

        Ok(signed.signed_tx)
    }

    /// Base64-encode a raw prepared blob and sign it.
    pub async fn sign_blob(
        &self,
        blob: &[u8],
        pubkey: &str,
        propagate: bool,
    ) -> WalletResult<SignedTransaction> {
        let blob_b64 = STANDARD.encode(blob);
        self.sign_transaction(&blob_b64, pubkey, propagate).await
    }
}

/// Trim trailing slashes and a mistakenly-included API version suffix.
fn normalize_wallet_url(raw: &str) -> String {
    let mut url = raw.trim_end_matches('/');
    if let Some(stripped) = url.strip_suffix("/api/v1") {
        tracing::warn!("wallet URL should not include the /api/v1 suffix; stripping it");
        url = stripped.trim_end_matches('/');
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wallet_url_plain() {
        assert_eq!(
            normalize_wallet_url("https://wallet.example.com"),
            "https://wallet.example.com"
        );
    }

    #[test]
    fn test_normalize_wallet_url_trailing_slash() {
        assert_eq!(
            normalize_wallet_url("https://wallet.example.com/"),
            "https://wallet.example.com"
        );
    }

    #[test]
    fn test_normalize_wallet_url_strips_version_suffix() {
        assert_eq!(
            normalize_wallet_url("https://wallet.example.com/api/v1"),
            "https://wallet.example.com"
        );
        assert_eq!(
            normalize_wallet_url("https://wallet.example.com/api/v1/"),
            "https://wallet.example.com"
        );
    }

    #[tokio::test]
    async fn test_authenticated_calls_require_login() {
        let client = WalletClient::new("https://wallet.example.com").unwrap();
        assert!(!client.is_logged_in());
        assert!(matches!(
            client.list_keys().await,
            Err(WalletError::NotLoggedIn)
        ));
        assert!(matches!(
            client.sign_transaction("AAAA", "pubkey", true).await,
            Err(WalletError::NotLoggedIn)
        ));
    }
}
