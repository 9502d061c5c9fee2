//! # Vesting schedule
//!
//! Pure arithmetic deciding when the next installment is due and how much
//! each participant receives.
//!
//! Period `n` (1-based) becomes due at
//!
//! ```text
//! vesting_reference_time + cliff + n * period_duration
//! ```
//!
//! Only the *next* unpaid period is ever evaluated; a late actuator catches
//! up one period per call.
//!
//! Every period releases the same fixed slice of the participant's original
//! purchase (`bought * percentage / 100`). The final period releases whatever
//! is still locked so that truncation dust is not stranded in the contract.

use crate::types::{CampaignConfig, ParticipantRecord};
use crate::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VestingScheduler {
    pub cliff_duration: u64,
    pub period_duration: u64,
    pub total_periods: u32,
    pub period_percentage: u32,
}

impl VestingScheduler {
    pub fn from_config(config: &CampaignConfig) -> Self {
        VestingScheduler {
            cliff_duration: config.vesting_cliff_duration,
            period_duration: config.vesting_period_duration,
            total_periods: config.vesting_total_periods,
            period_percentage: config.vesting_period_percentage,
        }
    }

    /// Timestamp at which the period after `periods_paid` becomes payable.
    ///
    /// `None` once every period has been paid, or if the boundary does not
    /// fit in a `u64`.
    pub fn next_period_time(&self, reference_time: u64, periods_paid: u32) -> Option<u64> {
        if periods_paid >= self.total_periods {
            return None;
        }
        let periods = u64::from(periods_paid) + 1;
        let offset = self.period_duration.checked_mul(periods)?;
        reference_time
            .checked_add(self.cliff_duration)?
            .checked_add(offset)
    }

    /// Seconds from the vesting reference time to the final period boundary,
    /// saturating at `u64::MAX`.
    pub fn schedule_length(&self) -> u64 {
        self.period_duration
            .saturating_mul(u64::from(self.total_periods))
            .saturating_add(self.cliff_duration)
    }

    pub fn period_due(&self, now: u64, reference_time: u64, periods_paid: u32) -> bool {
        self.next_period_time(reference_time, periods_paid)
            .map_or(false, |due_at| now >= due_at)
    }

    /// Uniform per-period release computed from the original purchase.
    pub fn release_amount(&self, total_allocation_bought: i128) -> Result<i128, Error> {
        total_allocation_bought
            .checked_mul(i128::from(self.period_percentage))
            .map(|scaled| scaled / 100)
            .ok_or(Error::Overflow)
    }

    pub fn is_final_period(&self, periods_paid: u32) -> bool {
        periods_paid.saturating_add(1) >= self.total_periods
    }

    /// Units to deliver to `record` for the period after `periods_paid`.
    pub fn installment(&self, record: &ParticipantRecord, periods_paid: u32) -> Result<i128, Error> {
        let locked = record.locked_allocation();
        if locked <= 0 {
            return Ok(0);
        }
        if self.is_final_period(periods_paid) {
            return Ok(locked);
        }
        Ok(self.release_amount(record.total_allocation_bought)?.min(locked))
    }
}
