//! Governance types for the Meridian node API: new-market proposals and
//! votes.

use serde::{Deserialize, Serialize};

use crate::api::types::market::{ContinuousTrading, Instrument, LogNormalRiskModel};
use crate::shared::string_i64;

/// Configuration of the market a proposal wants to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMarketConfiguration {
    pub instrument: Instrument,
    #[serde(rename = "decimalPlaces")]
    pub decimal_places: u64,
    #[serde(default)]
    pub metadata: Vec<String>,
    /// Seconds the opening auction runs once the market is enacted
    #[serde(rename = "openingAuctionDuration")]
    pub opening_auction_duration: i64,
    #[serde(rename = "logNormal")]
    pub log_normal: LogNormalRiskModel,
    pub continuous: ContinuousTrading,
}

/// New-market change set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMarket {
    pub changes: NewMarketConfiguration,
}

/// Terms of a governance proposal.
///
/// All three timestamps are seconds since epoch, in chain time: validation
/// must precede closing, closing must precede enactment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalTerms {
    #[serde(rename = "closingTimestamp", with = "string_i64")]
    pub closing_timestamp: i64,
    #[serde(rename = "enactmentTimestamp", with = "string_i64")]
    pub enactment_timestamp: i64,
    #[serde(rename = "validationTimestamp", with = "string_i64")]
    pub validation_timestamp: i64,
    #[serde(rename = "newMarket")]
    pub new_market: NewMarket,
}

/// Proposal lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalState {
    /// Validation failed before the proposal reached the network
    #[serde(rename = "STATE_FAILED")]
    Failed,
    /// Accepted and open for votes
    #[serde(rename = "STATE_OPEN")]
    Open,
    /// Voting closed with enough yes votes, awaiting enactment
    #[serde(rename = "STATE_PASSED")]
    Passed,
    /// Rejected by the network before opening
    #[serde(rename = "STATE_REJECTED")]
    Rejected,
    /// Voting closed without enough yes votes
    #[serde(rename = "STATE_DECLINED")]
    Declined,
    /// Enacted; for a new-market proposal the market is live
    #[serde(rename = "STATE_ENACTED")]
    Enacted,
    #[serde(rename = "STATE_WAITING_FOR_NODE_VOTE")]
    WaitingForNodeVote,
}

impl ProposalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalState::Failed => "STATE_FAILED",
            ProposalState::Open => "STATE_OPEN",
            ProposalState::Passed => "STATE_PASSED",
            ProposalState::Rejected => "STATE_REJECTED",
            ProposalState::Declined => "STATE_DECLINED",
            ProposalState::Enacted => "STATE_ENACTED",
            ProposalState::WaitingForNodeVote => "STATE_WAITING_FOR_NODE_VOTE",
        }
    }
}

impl std::fmt::Display for ProposalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable reason attached to failed/rejected proposals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalRejectionReason {
    #[default]
    #[serde(rename = "PROPOSAL_ERROR_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "PROPOSAL_ERROR_CLOSE_TIME_TOO_SOON")]
    CloseTimeTooSoon,
    #[serde(rename = "PROPOSAL_ERROR_CLOSE_TIME_TOO_LATE")]
    CloseTimeTooLate,
    #[serde(rename = "PROPOSAL_ERROR_ENACT_TIME_TOO_SOON")]
    EnactTimeTooSoon,
    #[serde(rename = "PROPOSAL_ERROR_ENACT_TIME_TOO_LATE")]
    EnactTimeTooLate,
    #[serde(rename = "PROPOSAL_ERROR_INSUFFICIENT_TOKENS")]
    InsufficientTokens,
    #[serde(rename = "PROPOSAL_ERROR_INVALID_INSTRUMENT_SECURITY")]
    InvalidInstrumentSecurity,
    #[serde(rename = "PROPOSAL_ERROR_NO_PRODUCT")]
    NoProduct,
    #[serde(rename = "PROPOSAL_ERROR_NO_RISK_PARAMETERS")]
    NoRiskParameters,
    #[serde(rename = "PROPOSAL_ERROR_INVALID_FUTURE_MATURITY_TIMESTAMP")]
    InvalidFutureMaturityTimestamp,
    #[serde(other)]
    Unknown,
}

impl ProposalRejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalRejectionReason::Unspecified => "PROPOSAL_ERROR_UNSPECIFIED",
            ProposalRejectionReason::CloseTimeTooSoon => "PROPOSAL_ERROR_CLOSE_TIME_TOO_SOON",
            ProposalRejectionReason::CloseTimeTooLate => "PROPOSAL_ERROR_CLOSE_TIME_TOO_LATE",
            ProposalRejectionReason::EnactTimeTooSoon => "PROPOSAL_ERROR_ENACT_TIME_TOO_SOON",
            ProposalRejectionReason::EnactTimeTooLate => "PROPOSAL_ERROR_ENACT_TIME_TOO_LATE",
            ProposalRejectionReason::InsufficientTokens => "PROPOSAL_ERROR_INSUFFICIENT_TOKENS",
            ProposalRejectionReason::InvalidInstrumentSecurity => {
                "PROPOSAL_ERROR_INVALID_INSTRUMENT_SECURITY"
            }
            ProposalRejectionReason::NoProduct => "PROPOSAL_ERROR_NO_PRODUCT",
            ProposalRejectionReason::NoRiskParameters => "PROPOSAL_ERROR_NO_RISK_PARAMETERS",
            ProposalRejectionReason::InvalidFutureMaturityTimestamp => {
                "PROPOSAL_ERROR_INVALID_FUTURE_MATURITY_TIMESTAMP"
            }
            ProposalRejectionReason::Unknown => "PROPOSAL_ERROR_UNKNOWN",
        }
    }
}

impl std::fmt::Display for ProposalRejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A governance proposal as observed from the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    /// Node-assigned identifier; becomes the market id once enacted
    pub id: String,
    /// Client-generated correlation reference
    pub reference: String,
    /// Proposing party (public key)
    #[serde(rename = "partyID")]
    pub party_id: String,
    pub state: ProposalState,
    #[serde(with = "string_i64", default)]
    pub timestamp: i64,
    #[serde(default)]
    pub reason: ProposalRejectionReason,
}

/// Proposal plus vote tallies, as returned by the proposals listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceData {
    pub proposal: Proposal,
}

/// Response for GET /parties/{party}/proposals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalsResponse {
    #[serde(default)]
    pub data: Vec<GovernanceData>,
}

/// Request for POST /governance/prepare/proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareProposalRequest {
    #[serde(rename = "partyID")]
    pub party_id: String,
    pub reference: String,
    pub proposal: ProposalTerms,
}

/// Vote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteValue {
    #[serde(rename = "VALUE_NO")]
    No,
    #[serde(rename = "VALUE_YES")]
    Yes,
}

impl VoteValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::No => "VALUE_NO",
            VoteValue::Yes => "VALUE_YES",
        }
    }
}

impl std::fmt::Display for VoteValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vote on an open proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "partyID")]
    pub party_id: String,
    pub value: VoteValue,
    #[serde(rename = "proposalID")]
    pub proposal_id: String,
    /// Chain time in seconds at the moment of voting
    #[serde(with = "string_i64")]
    pub timestamp: i64,
}

/// Request for POST /governance/prepare/vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareVoteRequest {
    pub vote: Vote,
}
