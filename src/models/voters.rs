use serde::{Deserialize, Serialize};

use crate::models::avatar_grid::PADDING_SENTINEL;
use crate::models::proposal::Vote;

/// Token reference inside an indexed vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounRef {
    pub id: String,
}

/// One indexed vote: who voted, which way, and with which tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    #[serde(default)]
    pub voter: Option<String>,
    pub support_detailed: u8,
    #[serde(default)]
    pub nouns: Vec<NounRef>,
}

/// Indexer answer to "votes by proposal".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalVotes {
    pub votes: Vec<VoteRecord>,
}

/// Token ids grouped by the way they voted, in indexer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoterBreakdown {
    pub for_nouns: Vec<String>,
    pub against_nouns: Vec<String>,
    pub abstain_nouns: Vec<String>,
}

impl VoterBreakdown {
    pub fn from_votes(votes: &ProposalVotes) -> Self {
        Self {
            for_nouns: token_ids_with_support(votes, Vote::For),
            against_nouns: token_ids_with_support(votes, Vote::Against),
            abstain_nouns: token_ids_with_support(votes, Vote::Abstain),
        }
    }

    pub fn nouns(&self, vote: Vote) -> &[String] {
        match vote {
            Vote::For => &self.for_nouns,
            Vote::Against => &self.against_nouns,
            Vote::Abstain => &self.abstain_nouns,
        }
    }
}

/// Decimal token ids only; anything else (including the grid sentinel) is dropped.
fn is_token_id(id: &str) -> bool {
    id != PADDING_SENTINEL && !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

fn token_ids_with_support(votes: &ProposalVotes, vote: Vote) -> Vec<String> {
    votes
        .votes
        .iter()
        .filter(|v| v.support_detailed == vote.support())
        .flat_map(|v| v.nouns.iter())
        .filter_map(|n| {
            if is_token_id(&n.id) {
                Some(n.id.clone())
            } else {
                log::warn!("Skipping malformed token id {:?} in vote list", n.id);
                None
            }
        })
        .collect()
}
