pub mod eligibility;
pub mod tally;
pub mod timing;
pub mod types;

pub use eligibility::{AdvanceAction, advance_action, can_vote};
pub use tally::VoteTally;
pub use timing::{AVERAGE_BLOCK_TIME_IN_SECS, ProposalTiming, TimingCopy};
pub use types::*;
