//! New-market governance flow: propose, watch, vote, wait for enactment.
//!
//! Market definitions are wrapped in [`ProposedMarket`] records that track
//! the three identifiers a definition picks up on its way to becoming a
//! live market: the client-generated reference, the node-assigned proposal
//! id, and finally the market id.
//!
//! Both watch loops are bounded by a [`PollConfig`]; a stalled network
//! surfaces as [`GovernanceError::Timeout`] instead of hanging forever.

use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng as _;
use thiserror::Error;

use crate::api::types::{
    Market, NewMarket, NewMarketConfiguration, PrepareProposalRequest, ProposalRejectionReason,
    ProposalState, ProposalTerms, Vote, VoteValue,
};
use crate::api::{NodeClient, NodeError};
use crate::wallet::{WalletClient, WalletError};

/// Length of generated proposal references.
const REFERENCE_LEN: usize = 40;

/// Offsets from current chain time for the proposal timeline, in seconds.
const VALIDATION_OFFSET_SECS: i64 = 12;
const CLOSING_OFFSET_SECS: i64 = 14;
const ENACTMENT_OFFSET_SECS: i64 = 16;

/// Opening auction length for newly enacted markets, in seconds.
const OPENING_AUCTION_DURATION_SECS: i64 = 1;

/// Governance flow errors.
#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// A proposal was observed in a terminal, non-open state
    #[error("proposal {reference} is in state {state}. Reason: {reason}")]
    ProposalFailed {
        reference: String,
        state: ProposalState,
        reason: ProposalRejectionReason,
    },

    /// A watch loop exhausted its polling budget
    #[error("timed out waiting for {stage}; {pending} of {total} outstanding")]
    Timeout {
        stage: &'static str,
        pending: usize,
        total: usize,
    },

    /// Voting was attempted before the proposal id was collected
    #[error("market {reference} has no proposal id yet")]
    MissingProposalId { reference: String },
}

/// Bounded polling policy for the watch loops.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between polls
    pub interval: Duration,
    /// Polls before giving up
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 300,
        }
    }
}

/// A market definition travelling through the governance flow.
#[derive(Debug, Clone)]
pub struct ProposedMarket {
    /// The market being proposed
    pub definition: Market,
    /// Client-generated correlation reference, unique per proposal
    pub reference: String,
    /// Node-assigned proposal id, known once the proposal is seen open
    pub proposal_id: Option<String>,
    /// Live market id, known once the proposal is enacted
    pub market_id: Option<String>,
}

impl ProposedMarket {
    /// Wrap a definition, keeping its pre-supplied reference or generating
    /// a fresh one.
    pub fn new(definition: Market) -> Self {
        let reference = definition
            .reference
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(generate_reference);
        Self {
            definition,
            reference,
            proposal_id: None,
            market_id: None,
        }
    }

    /// Wrap a whole batch of definitions.
    pub fn from_definitions(definitions: Vec<Market>) -> Vec<Self> {
        definitions.into_iter().map(Self::new).collect()
    }
}

/// Generate a 40-character alphanumeric proposal reference.
pub fn generate_reference() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_LEN)
        .map(char::from)
        .collect()
}

/// Build the proposal terms for one market definition.
///
/// The timeline is anchored on chain time, not wall-clock time: validation
/// at +12 s, vote closing at +14 s, enactment at +16 s.
pub fn build_proposal_terms(definition: &Market, chain_time_secs: i64) -> ProposalTerms {
    ProposalTerms {
        closing_timestamp: chain_time_secs + CLOSING_OFFSET_SECS,
        enactment_timestamp: chain_time_secs + ENACTMENT_OFFSET_SECS,
        validation_timestamp: chain_time_secs + VALIDATION_OFFSET_SECS,
        new_market: NewMarket {
            changes: NewMarketConfiguration {
                instrument: definition.tradable_instrument.instrument.clone(),
                decimal_places: definition.decimal_places,
                metadata: Vec::new(),
                opening_auction_duration: OPENING_AUCTION_DURATION_SECS,
                log_normal: definition.tradable_instrument.log_normal_risk_model.clone(),
                continuous: definition.continuous.clone(),
            },
        },
    }
}

/// Submit a governance proposal for every market in the batch.
///
/// Chain time is read once and shared across the batch, so all proposals
/// get the same timeline.
pub async fn propose_markets(
    node: &NodeClient,
    wallet: &WalletClient,
    pubkey: &str,
    markets: &[ProposedMarket],
) -> Result<(), GovernanceError> {
    let chain_time = node.blockchain_time_secs().await?;

    for market in markets {
        let request = PrepareProposalRequest {
            party_id: pubkey.to_string(),
            reference: market.reference.clone(),
            proposal: build_proposal_terms(&market.definition, chain_time),
        };
        let prepared = node.prepare_proposal(&request).await?;
        wallet.sign_blob(&prepared.blob, pubkey, true).await?;
        tracing::info!(reference = %market.reference, "proposed market");
    }

    Ok(())
}

/// Watch the party's proposals until every reference in the batch has been
/// matched to an open proposal, recording the assigned ids.
///
/// A matched proposal in any non-open state aborts the whole flow: the
/// batch cannot be voted through once one of its members is dead.
pub async fn collect_proposal_ids(
    node: &NodeClient,
    pubkey: &str,
    markets: &mut [ProposedMarket],
    poll: &PollConfig,
) -> Result<(), GovernanceError> {
    let total = markets.len();

    for attempt in 0..poll.max_attempts {
        let proposals = node.proposals_by_party(pubkey).await?;

        for datum in &proposals {
            let proposal = &datum.proposal;
            for market in markets.iter_mut().filter(|m| m.proposal_id.is_none()) {
                if market.reference != proposal.reference {
                    continue;
                }
                if proposal.state != ProposalState::Open {
                    return Err(GovernanceError::ProposalFailed {
                        reference: market.reference.clone(),
                        state: proposal.state,
                        reason: proposal.reason,
                    });
                }
                tracing::info!(
                    reference = %market.reference,
                    proposal_id = %proposal.id,
                    "proposal is open"
                );
                market.proposal_id = Some(proposal.id.clone());
            }
        }

        let done = markets.iter().filter(|m| m.proposal_id.is_some()).count();
        tracing::info!(done, total, "collecting proposal ids");
        if done == total {
            return Ok(());
        }
        if attempt + 1 < poll.max_attempts {
            tokio::time::sleep(poll.interval).await;
        }
    }

    let pending = markets.iter().filter(|m| m.proposal_id.is_none()).count();
    Err(GovernanceError::Timeout {
        stage: "proposal acceptance",
        pending,
        total,
    })
}

/// Cast a yes vote for every collected proposal in the batch.
pub async fn vote_on_proposals(
    node: &NodeClient,
    wallet: &WalletClient,
    pubkey: &str,
    markets: &[ProposedMarket],
) -> Result<(), GovernanceError> {
    let chain_time = node.blockchain_time_secs().await?;

    for market in markets {
        let proposal_id =
            market
                .proposal_id
                .clone()
                .ok_or_else(|| GovernanceError::MissingProposalId {
                    reference: market.reference.clone(),
                })?;

        let vote = Vote {
            party_id: pubkey.to_string(),
            value: VoteValue::Yes,
            proposal_id: proposal_id.clone(),
            timestamp: chain_time,
        };
        let prepared = node.prepare_vote(&vote).await?;
        wallet.sign_blob(&prepared.blob, pubkey, true).await?;
        tracing::info!(proposal_id = %proposal_id, "voted yes");
    }

    Ok(())
}

/// Watch the live market listing until every proposal id in the batch
/// appears as an enacted market, recording the market ids.
pub async fn wait_for_enactment(
    node: &NodeClient,
    markets: &mut [ProposedMarket],
    poll: &PollConfig,
) -> Result<(), GovernanceError> {
    let total = markets.len();

    for attempt in 0..poll.max_attempts {
        let live = node.list_markets().await?;

        for live_market in &live {
            for market in markets.iter_mut().filter(|m| m.market_id.is_none()) {
                if market.proposal_id.as_deref() == Some(live_market.id.as_str()) {
                    tracing::info!(market_id = %live_market.id, "market enacted");
                    market.market_id = Some(live_market.id.clone());
                }
            }
        }

        let done = markets.iter().filter(|m| m.market_id.is_some()).count();
        tracing::info!(done, total, "waiting for market enactment");
        if done == total {
            return Ok(());
        }
        if attempt + 1 < poll.max_attempts {
            tokio::time::sleep(poll.interval).await;
        }
    }

    let pending = markets.iter().filter(|m| m.market_id.is_none()).count();
    Err(GovernanceError::Timeout {
        stage: "market enactment",
        pending,
        total,
    })
}

/// Drive the whole flow for a batch of definitions: propose, wait for the
/// proposals to open, vote yes, wait for enactment.
///
/// Returns the batch with proposal and market ids filled in.
pub async fn run_new_market_flow(
    node: &NodeClient,
    wallet: &WalletClient,
    pubkey: &str,
    definitions: Vec<Market>,
    poll: &PollConfig,
) -> Result<Vec<ProposedMarket>, GovernanceError> {
    let mut markets = ProposedMarket::from_definitions(definitions);

    propose_markets(node, wallet, pubkey, &markets).await?;
    collect_proposal_ids(node, pubkey, &mut markets, poll).await?;
    vote_on_proposals(node, wallet, pubkey, &markets).await?;
    wait_for_enactment(node, &mut markets, poll).await?;

    Ok(markets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{
        ContinuousTrading, FutureProduct, Instrument, LogNormalModelParams, LogNormalRiskModel,
        TradableInstrument,
    };
    use std::collections::HashSet;

    fn sample_market() -> Market {
        Market {
            id: String::new(),
            tradable_instrument: TradableInstrument {
                instrument: Instrument {
                    name: "December 2026 ETH vs USD future".to_string(),
                    code: "ETHUSD/DEC26".to_string(),
                    base_name: "ETH".to_string(),
                    quote_name: "USD".to_string(),
                    future: FutureProduct {
                        asset: "USD".to_string(),
                        maturity: "2026-12-31T23:59:59Z".parse().unwrap(),
                    },
                },
                log_normal_risk_model: LogNormalRiskModel {
                    risk_aversion_parameter: 0.01,
                    tau: 0.000_114_077_116_130_504_22,
                    params: LogNormalModelParams {
                        mu: 0.0,
                        r: 0.016,
                        sigma: 1.5,
                    },
                },
            },
            decimal_places: 5,
            continuous: ContinuousTrading {
                tick_size: "1".to_string(),
            },
            reference: None,
        }
    }

    #[test]
    fn test_generated_references_are_unique_40_char_alphanumeric() {
        let definitions: Vec<Market> = (0..25).map(|_| sample_market()).collect();
        let markets = ProposedMarket::from_definitions(definitions);

        let references: HashSet<&str> =
            markets.iter().map(|m| m.reference.as_str()).collect();
        assert_eq!(references.len(), 25);

        for market in &markets {
            assert_eq!(market.reference.len(), 40);
            assert!(market
                .reference
                .chars()
                .all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_pre_supplied_reference_is_kept() {
        let mut definition = sample_market();
        definition.reference = Some("operator-chosen-reference".to_string());

        let market = ProposedMarket::new(definition);
        assert_eq!(market.reference, "operator-chosen-reference");
    }

    #[test]
    fn test_empty_pre_supplied_reference_is_replaced() {
        let mut definition = sample_market();
        definition.reference = Some(String::new());

        let market = ProposedMarket::new(definition);
        assert_eq!(market.reference.len(), 40);
    }

    #[test]
    fn test_proposal_timeline_offsets() {
        let terms = build_proposal_terms(&sample_market(), 1_000_000);

        assert_eq!(terms.validation_timestamp, 1_000_012);
        assert_eq!(terms.closing_timestamp, 1_000_014);
        assert_eq!(terms.enactment_timestamp, 1_000_016);
        assert!(terms.validation_timestamp < terms.closing_timestamp);
        assert!(terms.closing_timestamp < terms.enactment_timestamp);
    }

    #[test]
    fn test_proposal_terms_copy_the_definition() {
        let definition = sample_market();
        let terms = build_proposal_terms(&definition, 0);

        let changes = &terms.new_market.changes;
        assert_eq!(changes.instrument.code, "ETHUSD/DEC26");
        assert_eq!(changes.decimal_places, 5);
        assert_eq!(changes.opening_auction_duration, 1);
        assert_eq!(changes.continuous.tick_size, "1");
        assert_eq!(changes.log_normal.params.sigma, 1.5);
    }

    #[test]
    fn test_poll_config_default_is_one_second_bounded() {
        let poll = PollConfig::default();
        assert_eq!(poll.interval, Duration::from_secs(1));
        assert_eq!(poll.max_attempts, 300);
    }
}
