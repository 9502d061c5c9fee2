//! # IDO Campaign Contract
//!
//! A single fixed-term token offering. Participants contribute a payment
//! token during a bounded window; at the close the campaign either succeeds
//! (raise forwarded to the issuer, bought allocation vested to participants
//! in periodic installments after a cliff) or fails (everyone refunded,
//! inventory returned).
//!
//! | Phase        | Entry Point(s)                                      |
//! |--------------|-----------------------------------------------------|
//! | Bootstrap    | [`IdoCampaign::init`]                               |
//! | Issuer admin | `activate`, `pause`, `unpause`, `transfer_issuer`   |
//! | Funding      | [`IdoCampaign::contribute`]                         |
//! | Automation   | `tick`, `perform_upkeep`, `check_upkeep`            |
//! | Queries      | `state`, `config`, `ledger`, `record`, `participant_at`, ... |
//!
//! ## Architecture
//!
//! Authorization lives in [`access`], token movement in [`gateway`], storage
//! in [`storage`]. The phase logic is in [`lifecycle`], which drives the pure
//! [`cap_policy`] and [`vesting`] calculators and the [`ledger`]. This file
//! only wires entry points to those modules.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env};

pub mod access;
pub mod cap_policy;
pub mod events;
pub mod gateway;
pub mod ledger;
pub mod lifecycle;
mod storage;
mod types;
pub mod vesting;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_storage;

use access::{AccessControl, IssuerGuard};
use lifecycle::{DueWork, LifecycleStateMachine};
pub use types::{
    CampaignConfig, CampaignParams, CampaignState, LedgerState, ParticipantRecord, TickOutcome,
    DAY_IN_SECONDS,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidConfig = 4,
    InvalidTransition = 5,
    NotPreparing = 6,
    NotActive = 7,
    CampaignPaused = 8,
    BelowMinContribution = 9,
    AboveMaxContribution = 10,
    HardCapExceeded = 11,
    InsufficientInventory = 12,
    NothingDue = 13,
    Overflow = 14,
}

#[contract]
pub struct IdoCampaign;

#[contractimpl]
impl IdoCampaign {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Configure the campaign and record `issuer` as its privileged identity.
    ///
    /// Must be called exactly once; a second call fails with
    /// `Error::AlreadyInitialized`. Invalid parameters fail with
    /// `Error::InvalidConfig`.
    pub fn init(env: Env, issuer: Address, params: CampaignParams) -> Result<CampaignConfig, Error> {
        issuer.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let config = CampaignConfig::from_params(params)?;
        access::init_issuer(&env, &issuer)?;
        storage::save_new_campaign(&env, &config);

        events::emit_campaign_initialized(
            &env,
            issuer,
            config.payment_token.clone(),
            config.sale_token.clone(),
            config.soft_cap,
            config.hard_cap,
        );
        Ok(config)
    }

    // ─────────────────────────────────────────────────────────
    // Issuer administration
    // ─────────────────────────────────────────────────────────

    /// Open the funding window.
    ///
    /// The contract must already hold enough sale tokens to cover a raise of
    /// `hard_cap` at `token_price`.
    pub fn activate(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        IssuerGuard::new(&env).require_issuer(&caller)?;
        let now = env.ledger().timestamp();
        LifecycleStateMachine::load(&env)?.activate(now)
    }

    /// Block contributions. Does not affect `tick`.
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        IssuerGuard::new(&env).require_issuer(&caller)?;
        storage::set_paused(&env, true);
        events::emit_paused(&env, caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        IssuerGuard::new(&env).require_issuer(&caller)?;
        storage::set_paused(&env, false);
        events::emit_unpaused(&env, caller);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    /// Hand the issuer role to `new_issuer`. `current_issuer` must authorize.
    pub fn transfer_issuer(env: Env, current_issuer: Address, new_issuer: Address) -> Result<(), Error> {
        current_issuer.require_auth();
        access::transfer_issuer(&env, &current_issuer, &new_issuer)
    }

    pub fn issuer(env: Env) -> Option<Address> {
        access::get_issuer(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the payment token.
    ///
    /// Fails with `NotActive` outside the funding window, `CampaignPaused`
    /// while paused, and with a cap error if the amount is below the minimum,
    /// takes the participant over their maximum, or overshoots the hard cap.
    /// A contribution that fills the hard cap ends the funding phase in the
    /// same call. Returns the participant's updated record.
    pub fn contribute(env: Env, participant: Address, amount: i128) -> Result<ParticipantRecord, Error> {
        participant.require_auth();
        Self::require_not_paused(&env)?;
        let now = env.ledger().timestamp();
        LifecycleStateMachine::load(&env)?.contribute(&participant, amount, now)
    }

    // ─────────────────────────────────────────────────────────
    // Automation
    // ─────────────────────────────────────────────────────────

    /// Perform whatever time-based transition is due, at most one.
    ///
    /// Callable by anyone, any number of times. Returns
    /// `TickOutcome::NothingDue` without touching state when nothing is due.
    pub fn tick(env: Env) -> Result<TickOutcome, Error> {
        let now = env.ledger().timestamp();
        LifecycleStateMachine::load(&env)?.tick(now)
    }

    /// Like `tick`, but fails with `Error::NothingDue` when there is no work.
    pub fn perform_upkeep(env: Env) -> Result<TickOutcome, Error> {
        match Self::tick(env)? {
            TickOutcome::NothingDue => Err(Error::NothingDue),
            outcome => Ok(outcome),
        }
    }

    /// Whether a `tick` issued now would do any work.
    pub fn check_upkeep(env: Env) -> bool {
        let now = env.ledger().timestamp();
        match LifecycleStateMachine::load(&env) {
            Ok(machine) => machine.due_work(now) != DueWork::Nothing,
            Err(_) => false,
        }
    }

    pub fn funding_phase_should_end(env: Env) -> Result<bool, Error> {
        let now = env.ledger().timestamp();
        Ok(LifecycleStateMachine::load(&env)?.funding_phase_should_end(now))
    }

    pub fn vesting_period_due(env: Env) -> Result<bool, Error> {
        let now = env.ledger().timestamp();
        Ok(LifecycleStateMachine::load(&env)?.vesting_period_due(now))
    }

    /// Timestamp at which the next vesting period becomes payable.
    pub fn next_vesting_time(env: Env) -> Result<Option<u64>, Error> {
        Ok(LifecycleStateMachine::load(&env)?.next_vesting_time())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn state(env: Env) -> Result<CampaignState, Error> {
        Ok(storage::load_ledger(&env)?.state)
    }

    pub fn config(env: Env) -> Result<CampaignConfig, Error> {
        storage::load_config(&env)
    }

    pub fn ledger(env: Env) -> Result<LedgerState, Error> {
        storage::load_ledger(&env)
    }

    /// Position of `participant`; all zeros if they never contributed.
    pub fn record(env: Env, participant: Address) -> ParticipantRecord {
        storage::load_record(&env, &participant)
    }

    pub fn participant_count(env: Env) -> u32 {
        storage::participant_count(&env)
    }

    /// The `index`-th distinct participant in first-contribution order.
    pub fn participant_at(env: Env, index: u32) -> Option<Address> {
        storage::participant_at(&env, index)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_not_paused(env: &Env) -> Result<(), Error> {
        if storage::is_paused(env) {
            return Err(Error::CampaignPaused);
        }
        Ok(())
    }
}
