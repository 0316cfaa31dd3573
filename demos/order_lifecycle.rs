//! Order lifecycle flow.
//!
//! Submits a GTT limit order at price 1, amends it to price 2, then
//! cancels. Each transaction is prepared by the node, signed and broadcast
//! by the wallet service, and confirmed with a read-back after a fixed
//! wait.
//!
//! Configuration comes from the environment: NODE_URL_REST,
//! NODE_URL_GRPC, WALLETSERVER_URL, WALLET_NAME, WALLET_PASSPHRASE.

use std::time::Duration;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use meridian::api::types::{
    OrderAmendment, OrderSubmission, OrderType, Price, Side, TimeInForce,
};
use meridian::api::NodeClient;
use meridian::config::Config;
use meridian::orders::{self, CancellationScope, LifecycleConfig};
use meridian::wallet::WalletClient;

/// How long the submitted order stays on the book if nothing touches it.
const ORDER_LIFETIME: Duration = Duration::from_secs(120);

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

    let node = NodeClient::new(config.node_url_grpc.as_str())?;
    let markets = node.list_markets().await?;
    let market_id = markets.first().context("node lists no markets")?.id.clone();
    println!("Market found: {market_id}");

    let chain_time = node.blockchain_time().await?;
    println!("Blockchain time: {chain_time}");

    let lifecycle = LifecycleConfig::default();

    let submission = OrderSubmission {
        market_id: market_id.clone(),
        party_id: pubkey.clone(),
        price: 1,
        size: 10,
        side: Side::Buy,
        time_in_force: TimeInForce::Gtt,
        order_type: OrderType::Limit,
        expires_at: orders::expires_at(chain_time, ORDER_LIFETIME),
    };
    println!("Waiting for blockchain...");
    let submitted = orders::submit_order(&node, &wallet, &submission, &lifecycle).await?;
    println!(
        "Order processed, ID: {}, Status: {}",
        submitted.order.id, submitted.order.status
    );

    let amendment = OrderAmendment {
        market_id: market_id.clone(),
        party_id: pubkey.clone(),
        order_id: submitted.order.id.clone(),
        price: Some(Price { value: 2 }),
        time_in_force: Some(TimeInForce::Gtc),
    };
    println!("Waiting for blockchain...");
    let amended =
        orders::amend_order(&node, &wallet, &submitted.order, &amendment, &lifecycle).await?;
    println!("Amended Order:\n{amended}");

    // Other scopes: Single cancels one order, Market cancels every order
    // the party has on one market.
    let scope = CancellationScope::AllMarkets;
    println!("Waiting for blockchain...");
    let cancelled = orders::cancel_orders(
        &node,
        &wallet,
        &pubkey,
        scope,
        &submitted.reference,
        &lifecycle,
    )
    .await?;
    println!("Cancelled Order:\nID: {}, Status: {}", cancelled.id, cancelled.status);

    Ok(())
}
