use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use super::types::Proposal;

/// Mainnet block interval used to project block heights onto wall-clock time.
pub const AVERAGE_BLOCK_TIME_IN_SECS: i64 = 13;

/// Estimate when `target_block` is (or was) mined, relative to `now` at `current_block`.
/// This is an estimate; block times drift. `None` when the result is out of range.
pub fn project_block_time(now: DateTime<Utc>, current_block: u64, target_block: u64) -> Option<DateTime<Utc>> {
    let delta = i128::from(target_block) - i128::from(current_block);
    let secs = i64::try_from(delta.checked_mul(i128::from(AVERAGE_BLOCK_TIME_IN_SECS))?).ok()?;
    now.checked_add_signed(TimeDelta::try_seconds(secs)?)
}

/// Which label sits above the headline time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingCopy {
    Starts,
    Ends,
    Ended,
}

impl TimingCopy {
    pub fn label(&self) -> &'static str {
        match self {
            TimingCopy::Starts => "Starts",
            TimingCopy::Ends => "Ends",
            TimingCopy::Ended => "Ended",
        }
    }
}

/// Projected voting window of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalTiming {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ProposalTiming {
    /// Undefined without both a proposal and a current block, or when either
    /// end of the window falls outside the representable time range.
    pub fn project(proposal: Option<&Proposal>, current_block: Option<u64>, now: DateTime<Utc>) -> Option<Self> {
        let proposal = proposal?;
        let current_block = current_block?;
        Some(Self {
            start: project_block_time(now, current_block, proposal.start_block)?,
            end: project_block_time(now, current_block, proposal.end_block)?,
        })
    }

    pub fn is_active_for_voting(&self, now: DateTime<Utc>) -> bool {
        self.start < now && self.end > now
    }

    pub fn copy(&self, now: DateTime<Utc>) -> TimingCopy {
        if self.is_active_for_voting(now) {
            TimingCopy::Ends
        } else if self.end < now {
            TimingCopy::Ended
        } else {
            TimingCopy::Starts
        }
    }

    /// Start time until voting opens, end time afterwards.
    pub fn headline(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        if self.start >= now { self.start } else { self.end }
    }
}

/// "UTC", or "UTC+02:00" style for other offsets.
pub fn zone_label(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return "UTC".to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("UTC{}{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60)
}

/// e.g. "3:07 PM UTC"
pub fn format_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    format!("{} {}", at.with_timezone(&offset).format("%-I:%M %p"), zone_label(offset))
}

/// e.g. "March 4, 2024"
pub fn format_date(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%B %-d, %Y").to_string()
}
