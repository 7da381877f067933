//! In-memory governance chain backed by a JSON seed file. Serves the read
//! queries and simulates mining for votes, queueing and execution.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard};
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::{GovernanceSource, SourceError, TransactionSender};
use crate::models::proposal::{Proposal, ProposalStatus, Vote};
use crate::models::transaction::TransactionStatus;
use crate::models::voters::{NounRef, ProposalVotes, VoteRecord};

const DEFAULT_TIMELOCK_DELAY_SECS: i64 = 2 * 24 * 60 * 60;

fn default_timelock_delay() -> i64 {
    DEFAULT_TIMELOCK_DELAY_SECS
}

/// Voting power held by one account since a given block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegate {
    pub account: String,
    pub votes: u64,
    #[serde(default)]
    pub since_block: u64,
    #[serde(default)]
    pub nouns: Vec<String>,
}

/// Seed file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureData {
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default = "default_timelock_delay")]
    pub timelock_delay_secs: i64,
    pub proposals: Vec<Proposal>,
    /// Indexed votes keyed by proposal id. Missing keys read as "not indexed yet".
    #[serde(default)]
    pub votes: HashMap<String, ProposalVotes>,
    #[serde(default)]
    pub delegates: Vec<Delegate>,
}

impl FixtureData {
    fn find_proposal_mut(&mut self, id: &str) -> Result<&mut Proposal, String> {
        self.proposals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| format!("unknown proposal {id}"))
    }

    fn delegate(&self, account: &str) -> Option<&Delegate> {
        self.delegates.iter().find(|d| d.account.eq_ignore_ascii_case(account))
    }

    fn votes_as_of(&self, account: &str, block: u64) -> u64 {
        self.delegate(account)
            .filter(|d| d.since_block <= block)
            .map(|d| d.votes)
            .unwrap_or(0)
    }

    fn has_voted(&self, account: &str, proposal_id: &str) -> bool {
        self.votes.get(proposal_id).is_some_and(|pv| {
            pv.votes
                .iter()
                .any(|v| v.voter.as_deref().is_some_and(|voter| voter.eq_ignore_ascii_case(account)))
        })
    }

    fn check_vote(&self, account: &str, proposal_id: &str) -> Result<(), String> {
        let proposal = self
            .proposals
            .iter()
            .find(|p| p.id == proposal_id)
            .ok_or_else(|| format!("unknown proposal {proposal_id}"))?;
        if proposal.status != ProposalStatus::Active {
            return Err("GovernorBravo::castVoteInternal: voting is closed".to_string());
        }
        if self.has_voted(account, proposal_id) {
            return Err("GovernorBravo::castVoteInternal: voter already voted".to_string());
        }
        Ok(())
    }

    fn apply_vote(&mut self, account: &str, proposal_id: &str, vote: Vote) -> Result<(), String> {
        self.check_vote(account, proposal_id)?;
        let created_block = self.find_proposal_mut(proposal_id)?.created_block;
        let weight = self.votes_as_of(account, created_block);
        let nouns = self
            .delegate(account)
            .map(|d| d.nouns.iter().map(|id| NounRef { id: id.clone() }).collect())
            .unwrap_or_default();

        let proposal = self.find_proposal_mut(proposal_id)?;
        match vote {
            Vote::For => proposal.for_count += weight,
            Vote::Against => proposal.against_count += weight,
            Vote::Abstain => proposal.abstain_count += weight,
        }
        self.votes.entry(proposal_id.to_string()).or_default().votes.push(VoteRecord {
            voter: Some(account.to_string()),
            support_detailed: vote.support(),
            nouns,
        });
        Ok(())
    }

    fn apply_queue(&mut self, proposal_id: &str) -> Result<(), String> {
        let delay = TimeDelta::seconds(self.timelock_delay_secs);
        let proposal = self.find_proposal_mut(proposal_id)?;
        if proposal.status != ProposalStatus::Succeeded {
            return Err("GovernorBravo::queue: proposal can only be queued if it is succeeded".to_string());
        }
        proposal.status = ProposalStatus::Queued;
        proposal.eta = Some(Utc::now() + delay);
        Ok(())
    }

    fn apply_execute(&mut self, proposal_id: &str) -> Result<(), String> {
        let proposal = self.find_proposal_mut(proposal_id)?;
        if proposal.status != ProposalStatus::Queued {
            return Err("GovernorBravo::execute: proposal can only be executed if it is queued".to_string());
        }
        match proposal.eta {
            Some(eta) if Utc::now() >= eta => {
                proposal.status = ProposalStatus::Executed;
                Ok(())
            }
            _ => Err("Timelock::executeTransaction: Transaction hasn't surpassed time lock.".to_string()),
        }
    }
}

type Mutation = Box<dyn FnOnce(&mut FixtureData) -> Result<(), String> + Send>;

#[derive(Clone)]
pub struct FixtureChain {
    data: Arc<RwLock<FixtureData>>,
    mining_delay: Duration,
}

impl FixtureChain {
    pub fn new(data: FixtureData, mining_delay: Duration) -> Self {
        Self { data: Arc::new(RwLock::new(data)), mining_delay }
    }

    pub fn load(path: impl AsRef<Path>, mining_delay: Duration) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let data: FixtureData = serde_json::from_str(&json)?;
        log::info!(
            "Loaded fixture {}: {} proposals, {} delegates",
            path.display(),
            data.proposals.len(),
            data.delegates.len()
        );
        Ok(Self::new(data, mining_delay))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, FixtureData>, SourceError> {
        self.data
            .read()
            .map_err(|_| SourceError::Unavailable("fixture state lock poisoned".to_string()))
    }

    /// Run `precheck` now and `mutation` after the mining delay, publishing
    /// each step on the returned channel.
    fn submit(
        &self,
        label: &'static str,
        precheck: impl FnOnce(&FixtureData) -> Result<(), String>,
        mutation: Mutation,
    ) -> watch::Receiver<TransactionStatus> {
        let (tx, rx) = watch::channel(TransactionStatus::None);

        let checked = match self.data.read() {
            Ok(data) => precheck(&*data),
            Err(_) => Err("fixture state lock poisoned".to_string()),
        };
        if let Err(e) = checked {
            log::warn!("{label} rejected before mining: {e}");
            tx.send_replace(TransactionStatus::Exception { error_message: Some(e) });
            return rx;
        }

        tx.send_replace(TransactionStatus::Mining);
        let data = Arc::clone(&self.data);
        let delay = self.mining_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = match data.write() {
                Ok(mut guard) => mutation(&mut *guard),
                Err(_) => Err("fixture state lock poisoned".to_string()),
            };
            let status = match outcome {
                Ok(()) => {
                    log::info!("{label} mined");
                    TransactionStatus::Success
                }
                Err(e) => {
                    log::warn!("{label} reverted: {e}");
                    TransactionStatus::Fail { error_message: Some(e) }
                }
            };
            tx.send_replace(status);
        });
        rx
    }
}

impl GovernanceSource for FixtureChain {
    fn proposals(&self) -> Result<Vec<Proposal>, SourceError> {
        let mut proposals = self.read()?.proposals.clone();
        proposals.sort_by(|a, b| b.created_block.cmp(&a.created_block));
        Ok(proposals)
    }

    fn proposal(&self, id: &str) -> Result<Option<Proposal>, SourceError> {
        Ok(self.read()?.proposals.iter().find(|p| p.id == id).cloned())
    }

    fn user_votes_as_of_block(&self, account: &str, block: u64) -> Result<u64, SourceError> {
        Ok(self.read()?.votes_as_of(account, block))
    }

    fn has_voted_on_proposal(&self, account: &str, proposal_id: &str) -> Result<bool, SourceError> {
        Ok(self.read()?.has_voted(account, proposal_id))
    }

    fn block_number(&self) -> Result<Option<u64>, SourceError> {
        Ok(self.read()?.block_number)
    }

    fn votes_for_proposal(&self, proposal_id: &str) -> Result<Option<ProposalVotes>, SourceError> {
        Ok(self.read()?.votes.get(proposal_id).cloned())
    }
}

impl TransactionSender for FixtureChain {
    fn cast_vote(&self, account: &str, proposal_id: &str, vote: Vote) -> watch::Receiver<TransactionStatus> {
        let (account, proposal_id) = (account.to_string(), proposal_id.to_string());
        let (check_account, check_id) = (account.clone(), proposal_id.clone());
        self.submit(
            "castVote",
            move |data| data.check_vote(&check_account, &check_id),
            Box::new(move |data| data.apply_vote(&account, &proposal_id, vote)),
        )
    }

    fn queue_proposal(&self, _account: &str, proposal_id: &str) -> watch::Receiver<TransactionStatus> {
        let proposal_id = proposal_id.to_string();
        let check_id = proposal_id.clone();
        self.submit(
            "queue",
            move |data| match data.proposals.iter().find(|p| p.id == check_id) {
                Some(p) if p.status == ProposalStatus::Succeeded => Ok(()),
                Some(_) => Err("GovernorBravo::queue: proposal can only be queued if it is succeeded".to_string()),
                None => Err(format!("unknown proposal {check_id}")),
            },
            Box::new(move |data| data.apply_queue(&proposal_id)),
        )
    }

    fn execute_proposal(&self, _account: &str, proposal_id: &str) -> watch::Receiver<TransactionStatus> {
        let proposal_id = proposal_id.to_string();
        let check_id = proposal_id.clone();
        self.submit(
            "execute",
            move |data| match data.proposals.iter().find(|p| p.id == check_id) {
                Some(p) if p.status == ProposalStatus::Queued => Ok(()),
                Some(_) => Err("GovernorBravo::execute: proposal can only be executed if it is queued".to_string()),
                None => Err(format!("unknown proposal {check_id}")),
            },
            Box::new(move |data| data.apply_execute(&proposal_id)),
        )
    }
}
