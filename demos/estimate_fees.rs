//! Fee estimation flow.
//!
//! Logs into the wallet service, picks a signing key, finds a market and
//! asks the node what fees a hypothetical BUY limit order would incur.
//! Nothing is placed on the book.
//!
//! Configuration comes from the environment: NODE_URL_REST,
//! NODE_URL_GRPC, WALLETSERVER_URL, WALLET_NAME, WALLET_PASSPHRASE.

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use meridian::api::types::{OrderSubmission, OrderType, Side, TimeInForce};
use meridian::api::NodeClient;
use meridian::config::Config;
use meridian::wallet::WalletClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    println!("Logging into wallet: {}", config.wallet_name);
    let mut wallet = WalletClient::new(config.wallet_server_url.as_str())?;
    wallet
        .login(&config.wallet_name, &config.wallet_passphrase)
        .await?;
    println!("Logged in to wallet successfully");

    let pubkey = wallet.first_key().await?;
    println!("Selected pubkey for signing");

    let node = NodeClient::new(config.node_url_rest.as_str())?;
    let markets = node.list_markets().await?;
    let market = markets.first().context("node lists no markets")?;
    println!("Market found: {}", market.id);

    let order = OrderSubmission {
        market_id: market.id.clone(),
        party_id: pubkey,
        price: 100_000,
        size: 100,
        side: Side::Buy,
        time_in_force: TimeInForce::Gtc,
        order_type: OrderType::Limit,
        expires_at: 0,
    };
    println!("{}", serde_json::to_string_pretty(&order)?);

    let estimate = node.estimate_fee(&order).await?;
    println!("FeeEstimate:\n{}", serde_json::to_string_pretty(&estimate)?);

    Ok(())
}
