use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-chain lifecycle state of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Active,
    Canceled,
    Defeated,
    Succeeded,
    Queued,
    Expired,
    Executed,
    Vetoed,
}

impl ProposalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "Pending",
            ProposalStatus::Active => "Active",
            ProposalStatus::Canceled => "Canceled",
            ProposalStatus::Defeated => "Defeated",
            ProposalStatus::Succeeded => "Succeeded",
            ProposalStatus::Queued => "Queued",
            ProposalStatus::Expired => "Expired",
            ProposalStatus::Executed => "Executed",
            ProposalStatus::Vetoed => "Vetoed",
        }
    }

    /// CSS modifier used by the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            ProposalStatus::Active | ProposalStatus::Pending => "badge-primary",
            ProposalStatus::Succeeded | ProposalStatus::Executed => "badge-success",
            ProposalStatus::Queued => "badge-info",
            ProposalStatus::Defeated | ProposalStatus::Vetoed => "badge-danger",
            ProposalStatus::Canceled | ProposalStatus::Expired => "badge-muted",
        }
    }
}

/// One call the proposal will make when executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedTransaction {
    pub target: String,
    pub function_sig: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub call_data: String,
}

/// Proposal as reported by the governance data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub proposer: String,
    #[serde(default)]
    pub transaction_hash: String,
    pub status: ProposalStatus,
    pub created_block: u64,
    pub start_block: u64,
    pub end_block: u64,
    #[serde(default)]
    pub eta: Option<DateTime<Utc>>,
    #[serde(default)]
    pub for_count: u64,
    #[serde(default)]
    pub against_count: u64,
    #[serde(default)]
    pub abstain_count: u64,
    #[serde(default)]
    pub quorum_votes: u64,
    #[serde(default)]
    pub details: Vec<ProposedTransaction>,
}

/// A voter's choice. The discriminants are the contract's `support` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl Vote {
    /// Display order on the page.
    pub const ALL: [Vote; 3] = [Vote::For, Vote::Against, Vote::Abstain];

    pub fn support(self) -> u8 {
        self as u8
    }

    pub fn from_support(support: u8) -> Option<Self> {
        match support {
            0 => Some(Vote::Against),
            1 => Some(Vote::For),
            2 => Some(Vote::Abstain),
            _ => None,
        }
    }

    /// Parse a form value ("for", "against", "abstain").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "for" => Some(Vote::For),
            "against" => Some(Vote::Against),
            "abstain" => Some(Vote::Abstain),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vote::For => "for",
            Vote::Against => "against",
            Vote::Abstain => "abstain",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Vote::For => "For",
            Vote::Against => "Against",
            Vote::Abstain => "Abstain",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Vote::For => "Vote For",
            Vote::Against => "Vote Against",
            Vote::Abstain => "Abstain",
        }
    }
}
