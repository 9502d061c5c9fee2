//! Contribution limits.
//!
//! Pure validation against the configured bounds; holds no state beyond the
//! limits themselves.

use crate::types::CampaignConfig;
use crate::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CapPolicy {
    pub min_contribution: i128,
    pub max_contribution: i128,
    pub hard_cap: i128,
}

impl CapPolicy {
    pub fn from_config(config: &CampaignConfig) -> Self {
        CapPolicy {
            min_contribution: config.min_contribution,
            max_contribution: config.max_contribution,
            hard_cap: config.hard_cap,
        }
    }

    /// Per-participant check.
    ///
    /// `min_contribution` bounds a single contribution; `max_contribution`
    /// bounds the participant's cumulative total.
    pub fn validate(&self, current: i128, increment: i128) -> Result<(), Error> {
        if increment < self.min_contribution {
            return Err(Error::BelowMinContribution);
        }
        let next = current.checked_add(increment).ok_or(Error::Overflow)?;
        if next > self.max_contribution {
            return Err(Error::AboveMaxContribution);
        }
        Ok(())
    }

    /// Aggregate check: the campaign never raises more than `hard_cap`.
    pub fn validate_aggregate(&self, total_raised: i128, increment: i128) -> Result<(), Error> {
        let next = total_raised.checked_add(increment).ok_or(Error::Overflow)?;
        if next > self.hard_cap {
            return Err(Error::HardCapExceeded);
        }
        Ok(())
    }

    /// Run both checks in the order a contribution is evaluated.
    pub fn check(&self, current: i128, total_raised: i128, increment: i128) -> Result<(), Error> {
        self.validate(current, increment)?;
        self.validate_aggregate(total_raised, increment)
    }
}
