//! # Types
//!
//! Shared data structures used across all modules of the offering contract.
//!
//! ## Config / Ledger split
//!
//! A campaign is stored as two instance entries:
//!
//! - [`CampaignConfig`]: written once by `init`; never mutated.
//! - [`LedgerState`]: rewritten by every accepted contribution and by every
//!   `tick` that performs work.
//!
//! Per-participant data ([`ParticipantRecord`]) lives in persistent storage,
//! one entry per contributor.
//!
//! ## Campaign phases
//!
//! [`CampaignState`] only moves forward:
//!
//! ```text
//! Preparing ──► Active ──► Vesting ──► Completed
//!                  └──► Refunded
//! ```
//!
//! `Refunded` and `Completed` are terminal.

use soroban_sdk::{contracttype, Address};

use crate::Error;

/// Seconds in one day; campaign durations are configured in whole days.
pub const DAY_IN_SECONDS: u64 = 86_400;

/// Lifecycle phase of the campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignState {
    /// Deployed and configured; waiting for the issuer to fund and activate.
    Preparing,
    /// Accepting contributions until the funding deadline or the hard cap.
    Active,
    /// Soft cap missed; every contribution was returned.
    Refunded,
    /// Funding succeeded; allocation is being released period by period.
    Vesting,
    /// Every vesting period has been paid.
    Completed,
}

impl CampaignState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: CampaignState) -> bool {
        matches!(
            (self, next),
            (CampaignState::Preparing, CampaignState::Active)
                | (CampaignState::Active, CampaignState::Refunded)
                | (CampaignState::Active, CampaignState::Vesting)
                | (CampaignState::Vesting, CampaignState::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CampaignState::Refunded | CampaignState::Completed)
    }
}

/// Deployment parameters supplied to `init`.
///
/// Durations are expressed in whole days and converted to seconds when the
/// [`CampaignConfig`] is built.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignParams {
    /// Token contributions are paid in.
    pub payment_token: Address,
    /// Token being sold and vested.
    pub sale_token: Address,
    /// Payment-token units per sale-token unit.
    pub token_price: i128,
    pub min_contribution: i128,
    pub max_contribution: i128,
    pub soft_cap: i128,
    pub hard_cap: i128,
    pub investing_phase_days: u64,
    pub vesting_cliff_days: u64,
    pub vesting_total_periods: u32,
    pub vesting_period_days: u64,
    /// Share of each participant's allocation released per period (1–100).
    pub vesting_period_percentage: u32,
}

/// Immutable campaign configuration, written once at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub payment_token: Address,
    pub sale_token: Address,
    pub token_price: i128,
    pub min_contribution: i128,
    pub max_contribution: i128,
    pub soft_cap: i128,
    pub hard_cap: i128,
    /// Length of the funding window in seconds.
    pub investing_phase_duration: u64,
    /// Delay between funding success and the first period boundary, in seconds.
    pub vesting_cliff_duration: u64,
    pub vesting_period_duration: u64,
    pub vesting_total_periods: u32,
    pub vesting_period_percentage: u32,
}

impl CampaignConfig {
    /// Validate `params` and convert them into a stored configuration.
    ///
    /// The vesting schedule must release exactly 100% of every allocation:
    /// `vesting_total_periods * vesting_period_percentage == 100`.
    pub fn from_params(params: CampaignParams) -> Result<Self, Error> {
        if params.token_price <= 0 {
            return Err(Error::InvalidConfig);
        }
        if params.min_contribution <= 0 || params.min_contribution > params.max_contribution {
            return Err(Error::InvalidConfig);
        }
        if params.soft_cap <= 0 || params.soft_cap > params.hard_cap {
            return Err(Error::InvalidConfig);
        }
        // The sale must be able to sell at least one unit.
        if params.hard_cap < params.token_price {
            return Err(Error::InvalidConfig);
        }
        if params.investing_phase_days == 0 || params.vesting_period_days == 0 {
            return Err(Error::InvalidConfig);
        }
        if params.vesting_total_periods == 0
            || params.vesting_period_percentage == 0
            || params.vesting_period_percentage > 100
        {
            return Err(Error::InvalidConfig);
        }
        let coverage = params
            .vesting_total_periods
            .checked_mul(params.vesting_period_percentage)
            .ok_or(Error::InvalidConfig)?;
        if coverage != 100 {
            return Err(Error::InvalidConfig);
        }
        if params.payment_token == params.sale_token {
            return Err(Error::InvalidConfig);
        }

        Ok(CampaignConfig {
            payment_token: params.payment_token,
            sale_token: params.sale_token,
            token_price: params.token_price,
            min_contribution: params.min_contribution,
            max_contribution: params.max_contribution,
            soft_cap: params.soft_cap,
            hard_cap: params.hard_cap,
            investing_phase_duration: days_to_seconds(params.investing_phase_days)?,
            vesting_cliff_duration: days_to_seconds(params.vesting_cliff_days)?,
            vesting_period_duration: days_to_seconds(params.vesting_period_days)?,
            vesting_total_periods: params.vesting_total_periods,
            vesting_period_percentage: params.vesting_period_percentage,
        })
    }

    /// Sale-token units bought by a single contribution of `value`.
    /// Truncates; applied per contribution, never to a running total.
    pub fn allocation_for(&self, value: i128) -> i128 {
        value / self.token_price
    }

    /// Inventory the contract must hold before it can be activated.
    pub fn required_inventory(&self) -> i128 {
        self.allocation_for(self.hard_cap)
    }
}

fn days_to_seconds(days: u64) -> Result<u64, Error> {
    days.checked_mul(DAY_IN_SECONDS).ok_or(Error::Overflow)
}

/// Mutable campaign-wide accounting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerState {
    pub state: CampaignState,
    /// Always equal to the sum of every participant's `total_contribution`.
    pub total_raised: i128,
    /// Always equal to the sum of every participant's `total_allocation_bought`.
    pub total_allocation_bought: i128,
    pub reached_soft_cap: bool,
    pub reached_hard_cap: bool,
    /// Zero until activation.
    pub activation_time: u64,
    /// `activation_time + investing_phase_duration`; zero until activation.
    pub funding_deadline: u64,
    /// Moment funding succeeded; zero until the campaign enters `Vesting`.
    pub vesting_reference_time: u64,
    pub vesting_periods_paid: u32,
}

impl LedgerState {
    pub fn new() -> Self {
        LedgerState {
            state: CampaignState::Preparing,
            total_raised: 0,
            total_allocation_bought: 0,
            reached_soft_cap: false,
            reached_hard_cap: false,
            activation_time: 0,
            funding_deadline: 0,
            vesting_reference_time: 0,
            vesting_periods_paid: 0,
        }
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-participant position.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParticipantRecord {
    /// Cumulative payment-token value contributed; zeroed by a refund.
    pub total_contribution: i128,
    /// Cumulative sale-token units bought; zeroed by a refund.
    pub total_allocation_bought: i128,
    /// Sale-token units already delivered by vesting payouts.
    pub allocation_released: i128,
}

impl ParticipantRecord {
    pub fn locked_allocation(&self) -> i128 {
        self.total_allocation_bought - self.allocation_released
    }
}

/// Result of a `tick`.
///
/// A tick performs at most one unit of work; `NothingDue` is an ordinary
/// outcome, not an error.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    NothingDue,
    /// Funding window closed with the soft cap met; campaign is now vesting.
    FundingSucceeded,
    /// Funding window closed below the soft cap; everyone was refunded.
    FundingFailed,
    /// The given period (1-based) was paid to every participant.
    PeriodPaid(u32),
    /// The last period was paid and the campaign is complete.
    Completed,
}
