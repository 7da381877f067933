use super::types::{Proposal, Vote};

/// Share of `total` held by `count`, in percent. Zero when nobody has voted.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 100.0) / total as f64
}

/// Vote counts and derived percentages for one proposal.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteTally {
    pub for_count: u64,
    pub against_count: u64,
    pub abstain_count: u64,
    pub quorum_votes: u64,
    pub total: u64,
    pub for_percentage: f64,
    pub against_percentage: f64,
    pub abstain_percentage: f64,
}

impl VoteTally {
    pub fn from_proposal(proposal: &Proposal) -> Self {
        let total = proposal
            .for_count
            .saturating_add(proposal.against_count)
            .saturating_add(proposal.abstain_count);
        Self {
            for_count: proposal.for_count,
            against_count: proposal.against_count,
            abstain_count: proposal.abstain_count,
            quorum_votes: proposal.quorum_votes,
            total,
            for_percentage: percentage(proposal.for_count, total),
            against_percentage: percentage(proposal.against_count, total),
            abstain_percentage: percentage(proposal.abstain_count, total),
        }
    }

    pub fn count(&self, vote: Vote) -> u64 {
        match vote {
            Vote::For => self.for_count,
            Vote::Against => self.against_count,
            Vote::Abstain => self.abstain_count,
        }
    }

    pub fn percentage(&self, vote: Vote) -> f64 {
        match vote {
            Vote::For => self.for_percentage,
            Vote::Against => self.against_percentage,
            Vote::Abstain => self.abstain_percentage,
        }
    }

    /// For minus against; negative while the proposal is losing.
    pub fn differential(&self) -> i128 {
        self.for_count as i128 - self.against_count as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::proposal::types::ProposalStatus;

    fn proposal_with(for_count: u64, against_count: u64, abstain_count: u64) -> Proposal {
        Proposal {
            id: "1".into(),
            title: "t".into(),
            description: String::new(),
            proposer: String::new(),
            transaction_hash: String::new(),
            status: ProposalStatus::Active,
            created_block: 1,
            start_block: 2,
            end_block: 3,
            eta: None,
            for_count,
            against_count,
            abstain_count,
            quorum_votes: 7,
            details: vec![],
        }
    }

    #[test]
    fn percentages_split_total() {
        let t = VoteTally::from_proposal(&proposal_with(10, 5, 5));
        assert_eq!(t.total, 20);
        assert_eq!(t.for_percentage, 50.0);
        assert_eq!(t.against_percentage, 25.0);
        assert_eq!(t.abstain_percentage, 25.0);
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let t = VoteTally::from_proposal(&proposal_with(0, 0, 0));
        assert_eq!(t.for_percentage, 0.0);
        assert_eq!(t.against_percentage, 0.0);
        assert_eq!(t.abstain_percentage, 0.0);
        assert!(!t.for_percentage.is_nan());
    }

    #[test]
    fn differential_can_go_negative() {
        let t = VoteTally::from_proposal(&proposal_with(3, 8, 0));
        assert_eq!(t.differential(), -5);
        assert_eq!(t.quorum_votes, 7);
    }
}
