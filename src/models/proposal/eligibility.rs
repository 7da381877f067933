use chrono::{DateTime, Utc};

use super::types::{Proposal, ProposalStatus};

/// Whether the viewer may vote: some voting power at the creation block,
/// no vote cast yet, and the proposal still active.
pub fn can_vote(status: ProposalStatus, available_votes: Option<u64>, has_voted: bool) -> bool {
    available_votes.is_some_and(|v| v > 0) && !has_voted && status == ProposalStatus::Active
}

/// The snapshot-block notice shown to active-proposal viewers who have not voted.
pub fn show_block_restriction(status: ProposalStatus, has_voted: bool) -> bool {
    status == ProposalStatus::Active && !has_voted
}

pub fn show_vote_thanks(status: ProposalStatus, has_voted: bool) -> bool {
    status == ProposalStatus::Active && has_voted
}

/// Lifecycle step a proposal is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceAction {
    Queue,
    Execute,
}

impl AdvanceAction {
    pub fn label(&self) -> &'static str {
        match self {
            AdvanceAction::Queue => "Queue",
            AdvanceAction::Execute => "Execute",
        }
    }

    pub fn button_label(&self) -> String {
        format!("{} Proposal", self.label())
    }
}

/// Succeeded proposals can always be queued. Queued proposals can be
/// executed once `now` reaches the eta; without an eta they never can.
pub fn advance_action(proposal: &Proposal, now: DateTime<Utc>) -> Option<AdvanceAction> {
    match proposal.status {
        ProposalStatus::Succeeded => Some(AdvanceAction::Queue),
        ProposalStatus::Queued => match proposal.eta {
            Some(eta) if now >= eta => Some(AdvanceAction::Execute),
            _ => None,
        },
        _ => None,
    }
}
