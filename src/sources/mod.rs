//! Seams to the outside world: the governance indexer/contract reads and the
//! wallet-driven transaction senders.

pub mod fixture;

use std::fmt;

use tokio::sync::watch;

use crate::models::proposal::{Proposal, Vote};
use crate::models::transaction::TransactionStatus;
use crate::models::voters::ProposalVotes;

#[derive(Debug)]
pub enum SourceError {
    Io(std::io::Error),
    Malformed(String),
    Unavailable(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io(e) => write!(f, "I/O error: {e}"),
            SourceError::Malformed(e) => write!(f, "Malformed data: {e}"),
            SourceError::Unavailable(e) => write!(f, "Source unavailable: {e}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e)
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Malformed(e.to_string())
    }
}

/// Read side: proposal data, voting power and the current block.
pub trait GovernanceSource: Send + Sync {
    fn proposals(&self) -> Result<Vec<Proposal>, SourceError>;

    fn proposal(&self, id: &str) -> Result<Option<Proposal>, SourceError>;

    /// Votes `account` controlled at `block`.
    fn user_votes_as_of_block(&self, account: &str, block: u64) -> Result<u64, SourceError>;

    fn has_voted_on_proposal(&self, account: &str, proposal_id: &str) -> Result<bool, SourceError>;

    /// `None` until the node has reported a block.
    fn block_number(&self) -> Result<Option<u64>, SourceError>;

    /// `None` while the indexer has not seen the proposal yet.
    fn votes_for_proposal(&self, proposal_id: &str) -> Result<Option<ProposalVotes>, SourceError>;
}

/// Write side. Each call returns a receiver that follows the transaction
/// through None → Mining → Success | Fail | Exception.
pub trait TransactionSender: Send + Sync {
    fn cast_vote(&self, account: &str, proposal_id: &str, vote: Vote) -> watch::Receiver<TransactionStatus>;

    fn queue_proposal(&self, account: &str, proposal_id: &str) -> watch::Receiver<TransactionStatus>;

    fn execute_proposal(&self, account: &str, proposal_id: &str) -> watch::Receiver<TransactionStatus>;
}
