//! Meridian node API client.
//!
//! [`NodeClient`] is a type-safe interface over the node's request/response
//! endpoints: market listing, chain time, fee estimation, transaction
//! preparation for orders and governance, and order/proposal lookups.
//!
//! # Example
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
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;

use crate::api::error::{NodeError, NodeResult};
use crate::api::types::*;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Nanoseconds per second, for chain time conversions.
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Builder for configuring [`NodeClient`].
#[derive(Debug, Clone)]
pub struct NodeClientBuilder {
    base_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl NodeClientBuilder {
    /// Create a new builder with the given node address.
    ///
    /// Accepts a full URL or a bare `host:port` gateway address, which is
    /// taken to be plain http.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_node_url(&base_url.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: Vec::new(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the client.
    pub fn build(self) -> NodeResult<NodeClient> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        for (name, value) in self.default_headers {
            let header_name = reqwest::header::HeaderName::try_from(name.as_str()).map_err(|e| {
                NodeError::InvalidParameter(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = reqwest::header::HeaderValue::from_str(&value).map_err(|e| {
                NodeError::InvalidParameter(format!("Invalid header value for '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let http_client = Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()?;

        Ok(NodeClient {
            http_client,
            base_url: self.base_url,
        })
    }
}

/// Meridian node API client.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http_client: Client,
    base_url: String,
}

impl NodeClient {
    /// Create a new client with default settings (30 s timeout).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> NodeResult<Self> {
        NodeClientBuilder::new(base_url).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(base_url: impl Into<String>) -> NodeClientBuilder {
        NodeClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> NodeResult<T> {
        let response = self.http_client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn post<T, B>(&self, url: &str, body: &B) -> NodeResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self.http_client.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> NodeResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NodeError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| NodeError::Deserialize(e.to_string()))
    }

    // =========================================================================
    // Markets and chain time
    // =========================================================================

    /// List all markets known to the node.
    pub async fn list_markets(&self) -> NodeResult<Vec<Market>> {
        let url = format!("{}/markets", self.base_url);
        let response: MarketsResponse = self.get(&url).await?;
        Ok(response.markets)
    }

    /// Current chain time in nanoseconds since epoch.
    pub async fn blockchain_time(&self) -> NodeResult<i64> {
        let url = format!("{}/time", self.base_url);
        let response: TimeResponse = self.get(&url).await?;
        Ok(response.timestamp)
    }

    /// Current chain time in whole seconds since epoch.
    pub async fn blockchain_time_secs(&self) -> NodeResult<i64> {
        Ok(self.blockchain_time().await? / NANOS_PER_SEC)
    }

    // =========================================================================
    // Fees
    // =========================================================================

    /// Estimate the fees a hypothetical order would incur. The order is
    /// never placed.
    pub async fn estimate_fee(&self, order: &OrderSubmission) -> NodeResult<FeeEstimate> {
        let url = format!("{}/orders/fee/estimate", self.base_url);
        self.post(
            &url,
            &EstimateFeeRequest {
                order: order.clone(),
            },
        )
        .await
    }

    // =========================================================================
    // Order transaction preparation
    // =========================================================================

    /// Prepare an unsigned submit-order transaction.
    ///
    /// The returned blob must be signed by the wallet service; `submit_id`
    /// carries the reference for the later confirmation lookup.
    pub async fn prepare_submit_order(
        &self,
        submission: &OrderSubmission,
    ) -> NodeResult<PreparedTransaction> {
        let url = format!("{}/orders/prepare/submit", self.base_url);
        self.post(
            &url,
            &PrepareSubmitOrderRequest {
                submission: submission.clone(),
            },
        )
        .await
    }

    /// Prepare an unsigned amend-order transaction.
    pub async fn prepare_amend_order(
        &self,
        amendment: &OrderAmendment,
    ) -> NodeResult<PreparedTransaction> {
        let url = format!("{}/orders/prepare/amend", self.base_url);
        self.post(
            &url,
            &PrepareAmendOrderRequest {
                amendment: amendment.clone(),
            },
        )
        .await
    }

    /// Prepare an unsigned cancel-orders transaction.
    ///
    /// The populated fields of the cancellation select the scope; see
    /// [`OrderCancellation`].
    pub async fn prepare_cancel_order(
        &self,
        cancellation: &OrderCancellation,
    ) -> NodeResult<PreparedTransaction> {
        let url = format!("{}/orders/prepare/cancel", self.base_url);
        self.post(
            &url,
            &PrepareCancelOrderRequest {
                cancellation: cancellation.clone(),
            },
        )
        .await
    }

    // =========================================================================
    // Order lookups
    // =========================================================================

    /// Look up an order by its client-generated reference.
    pub async fn order_by_reference(&self, reference: &str) -> NodeResult<Order> {
        if reference.is_empty() {
            return Err(NodeError::InvalidParameter(
                "reference cannot be empty".to_string(),
            ));
        }
        let url = format!(
            "{}/orders/reference/{}",
            self.base_url,
            urlencoding::encode(reference)
        );
        let response: OrderResponse = self.get(&url).await?;
        Ok(response.order)
    }

    /// Look up an order by its node-assigned identifier.
    pub async fn order_by_id(&self, order_id: &str) -> NodeResult<Order> {
        if order_id.is_empty() {
            return Err(NodeError::InvalidParameter(
                "order_id cannot be empty".to_string(),
            ));
        }
        let url = format!("{}/orders/{}", self.base_url, urlencoding::encode(order_id));
        let response: OrderResponse = self.get(&url).await?;
        Ok(response.order)
    }

    // =========================================================================
    // Governance
    // =========================================================================

    /// Prepare an unsigned new-market proposal transaction.
    pub async fn prepare_proposal(
        &self,
        request: &PrepareProposalRequest,
    ) -> NodeResult<PreparedTransaction> {
        let url = format!("{}/governance/prepare/proposal", self.base_url);
        self.post(&url, request).await
    }

    /// Prepare an unsigned vote transaction.
    pub async fn prepare_vote(&self, vote: &Vote) -> NodeResult<PreparedTransaction> {
        let url = format!("{}/governance/prepare/vote", self.base_url);
        self.post(&url, &PrepareVoteRequest { vote: vote.clone() }).await
    }

    /// List every governance proposal raised by a party.
    pub async fn proposals_by_party(&self, party: &str) -> NodeResult<Vec<GovernanceData>> {
        if party.is_empty() {
            return Err(NodeError::InvalidParameter(
                "party cannot be empty".to_string(),
            ));
        }
        let url = format!(
            "{}/parties/{}/proposals",
            self.base_url,
            urlencoding::encode(party)
        );
        let response: ProposalsResponse = self.get(&url).await?;
        Ok(response.data)
    }
}

/// Trim trailing slashes and default bare `host:port` addresses to http.
fn normalize_node_url(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
