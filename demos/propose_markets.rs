//! Market proposal flow.
//!
//! Loads a batch of market definitions, proposes each one, waits for the
//! proposals to open, votes yes, and waits until every market is enacted.
//!
//! ```text
//! cargo run --example propose_markets -- \
//!   --markets markets.json \
//!   --walletname trader \
//!   --passphrase "..." \
//!   --walletserver https://wallet.example.com \
//!   --veganode node.example.com:3002
//! ```

use anyhow::ensure;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use meridian::api::NodeClient;
use meridian::config::MarketsSource;
use meridian::governance::{self, PollConfig};
use meridian::wallet::WalletClient;

#[derive(Debug, Parser)]
#[command(name = "propose_markets", version, about = "Propose and enact a batch of markets")]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    loglevel: String,

    /// Path to a markets JSON file, or a URL to a node's markets endpoint
    #[arg(long)]
    markets: String,

    /// Wallet name
    #[arg(long)]
    walletname: String,

    /// Wallet passphrase
    #[arg(long)]
    passphrase: String,

    /// Wallet server (e.g. https://wallet.example.com)
    #[arg(long)]
    walletserver: String,

    /// Node gateway (e.g. node.example.com:3002)
    #[arg(long)]
    veganode: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(cli.loglevel.to_lowercase())?)
        .init();

    // Resolve the markets argument before doing anything remote.
    let source = MarketsSource::parse(&cli.markets)?;

    let mut wallet = WalletClient::new(cli.walletserver.as_str())?;
    wallet.login(&cli.walletname, &cli.passphrase).await?;
    let pubkey = wallet.first_key().await?;
    tracing::info!(pubkey = %pubkey, "using signing key");

    let node = NodeClient::new(cli.veganode.as_str())?;

    let definitions = source.load().await?;
    ensure!(!definitions.is_empty(), "no market definitions to propose");
    tracing::info!(count = definitions.len(), "loaded market definitions");

    let markets = governance::run_new_market_flow(
        &node,
        &wallet,
        &pubkey,
        definitions,
        &PollConfig::default(),
    )
    .await?;

    for market in &markets {
        tracing::info!(
            reference = %market.reference,
            market_id = market.market_id.as_deref().unwrap_or("-"),
            "market live"
        );
    }
    tracing::info!("Done");

    Ok(())
}
