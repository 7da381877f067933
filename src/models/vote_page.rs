use chrono::{DateTime, Utc};

use crate::models::proposal::eligibility::{self, AdvanceAction};
use crate::models::proposal::{Proposal, ProposalTiming, TimingCopy, VoteTally};
use crate::models::voters::{ProposalVotes, VoterBreakdown};

/// Everything the vote page derives from, passed explicitly.
#[derive(Debug, Clone, Copy)]
pub struct VotePageInputs<'a> {
    pub proposal: &'a Proposal,
    pub votes: &'a ProposalVotes,
    pub active_account: Option<&'a str>,
    pub current_block: Option<u64>,
    /// Viewer's voting power at the proposal's creation block.
    pub available_votes: Option<u64>,
    pub has_voted: bool,
    pub now: DateTime<Utc>,
}

/// Display values and flags for the vote page.
#[derive(Debug, Clone)]
pub struct VotePageView {
    pub tally: VoteTally,
    pub breakdown: VoterBreakdown,
    pub timing: Option<ProposalTiming>,
    pub timing_copy: TimingCopy,
    pub headline_time: Option<DateTime<Utc>>,
    pub is_wallet_connected: bool,
    pub is_active_for_voting: bool,
    pub show_voting_buttons: bool,
    pub show_block_restriction: bool,
    pub show_vote_thanks: bool,
    pub advance_action: Option<AdvanceAction>,
}

impl VotePageView {
    pub fn derive(inputs: VotePageInputs<'_>) -> Self {
        let VotePageInputs { proposal, votes, active_account, current_block, available_votes, has_voted, now } =
            inputs;

        let timing = ProposalTiming::project(Some(proposal), current_block, now);
        let timing_copy = timing.map(|t| t.copy(now)).unwrap_or(TimingCopy::Starts);
        let status = proposal.status;

        Self {
            tally: VoteTally::from_proposal(proposal),
            breakdown: VoterBreakdown::from_votes(votes),
            timing,
            timing_copy,
            headline_time: timing.map(|t| t.headline(now)),
            is_wallet_connected: active_account.is_some(),
            is_active_for_voting: timing.is_some_and(|t| t.is_active_for_voting(now)),
            show_voting_buttons: eligibility::can_vote(status, available_votes, has_voted),
            show_block_restriction: eligibility::show_block_restriction(status, has_voted),
            show_vote_thanks: eligibility::show_vote_thanks(status, has_voted),
            advance_action: eligibility::advance_action(proposal, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::proposal::ProposalStatus;
    use crate::models::voters::{NounRef, VoteRecord};
    use chrono::TimeZone;

    fn proposal() -> Proposal {
        Proposal {
            id: "4".into(),
            title: "Treasury swap".into(),
            description: String::new(),
            proposer: "0x0000000000000000000000000000000000000001".into(),
            transaction_hash: "0xabcdef".into(),
            status: ProposalStatus::Active,
            created_block: 90,
            start_block: 100,
            end_block: 200,
            eta: None,
            for_count: 10,
            against_count: 5,
            abstain_count: 5,
            quorum_votes: 3,
            details: vec![],
        }
    }

    fn votes() -> ProposalVotes {
        ProposalVotes {
            votes: vec![
                VoteRecord { voter: None, support_detailed: 1, nouns: vec![NounRef { id: "3".into() }] },
                VoteRecord { voter: None, support_detailed: 0, nouns: vec![NounRef { id: "7".into() }] },
            ],
        }
    }

    #[test]
    fn derives_active_page() {
        let p = proposal();
        let v = votes();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let view = VotePageView::derive(VotePageInputs {
            proposal: &p,
            votes: &v,
            active_account: Some("0x0000000000000000000000000000000000000002"),
            current_block: Some(150),
            available_votes: Some(1),
            has_voted: false,
            now,
        });

        assert_eq!(view.tally.for_percentage, 50.0);
        assert_eq!(view.breakdown.for_nouns, vec!["3"]);
        assert_eq!(view.breakdown.against_nouns, vec!["7"]);
        assert!(view.is_active_for_voting);
        assert_eq!(view.timing_copy, TimingCopy::Ends);
        assert!(view.show_voting_buttons);
        assert!(view.show_block_restriction);
        assert!(!view.show_vote_thanks);
        assert_eq!(view.advance_action, None);
    }

    #[test]
    fn missing_block_leaves_timing_undefined() {
        let p = proposal();
        let v = votes();
        let view = VotePageView::derive(VotePageInputs {
            proposal: &p,
            votes: &v,
            active_account: None,
            current_block: None,
            available_votes: None,
            has_voted: false,
            now: Utc::now(),
        });
        assert!(view.timing.is_none());
        assert!(view.headline_time.is_none());
        assert!(!view.is_active_for_voting);
        assert!(!view.is_wallet_connected);
        assert!(!view.show_voting_buttons);
    }
}
