//! # Lifecycle state machine
//!
//! Owns the campaign phase and time anchors, and drives [`CapPolicy`],
//! [`InvestmentLedger`] and [`VestingScheduler`] from the two mutating entry
//! points: a participant contribution and the external `tick`.
//!
//! | From      | Trigger      | Guard                          | To                   |
//! |-----------|--------------|--------------------------------|----------------------|
//! | Preparing | `activate`   | inventory covers the hard cap  | Active               |
//! | Active    | `contribute` | caps accept                    | Active / Vesting     |
//! | Active    | `tick`       | funding deadline passed        | Vesting / Refunded   |
//! | Vesting   | `tick`       | next period due                | Vesting / Completed  |
//!
//! A contribution that fills the hard cap runs the success branch inline.
//! A `tick` performs at most one unit of work and is a no-op when nothing is
//! due. Everything runs inside one host invocation, so an error anywhere
//! discards the whole call.

use soroban_sdk::{Address, Env};

use crate::access;
use crate::cap_policy::CapPolicy;
use crate::events;
use crate::gateway::{AssetMovement, TokenGateway};
use crate::ledger::InvestmentLedger;
use crate::storage;
use crate::types::{CampaignConfig, CampaignState, LedgerState, ParticipantRecord, TickOutcome};
use crate::vesting::VestingScheduler;
use crate::Error;

/// Work a `tick` issued now would perform.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DueWork {
    Nothing,
    EndFunding,
    PayPeriod,
}

pub struct LifecycleStateMachine<'a, V: AssetMovement, A: AssetMovement> {
    env: &'a Env,
    config: CampaignConfig,
    ledger: LedgerState,
    investments: InvestmentLedger<'a>,
    /// Payment-token movements.
    value: V,
    /// Sale-token movements.
    allocation: A,
}

impl<'a> LifecycleStateMachine<'a, TokenGateway<'a>, TokenGateway<'a>> {
    /// Load the stored campaign and wire it to its token contracts.
    pub fn load(env: &'a Env) -> Result<Self, Error> {
        let config = storage::load_config(env)?;
        let ledger = storage::load_ledger(env)?;
        let value = TokenGateway::new(env, &config.payment_token);
        let allocation = TokenGateway::new(env, &config.sale_token);
        Ok(Self::new(env, config, ledger, value, allocation))
    }
}

impl<'a, V: AssetMovement, A: AssetMovement> LifecycleStateMachine<'a, V, A> {
    pub fn new(env: &'a Env, config: CampaignConfig, ledger: LedgerState, value: V, allocation: A) -> Self {
        LifecycleStateMachine {
            env,
            config,
            ledger,
            investments: InvestmentLedger::new(env),
            value,
            allocation,
        }
    }

    fn scheduler(&self) -> VestingScheduler {
        VestingScheduler::from_config(&self.config)
    }

    /// TTL that keeps campaign entries live from `now` until the last vesting
    /// period measured from `anchor`.
    fn lifetime(&self, now: u64, anchor: u64) -> u32 {
        let end = anchor.saturating_add(self.scheduler().schedule_length());
        storage::lifetime_ledgers(self.env, end.saturating_sub(now))
    }

    fn issuer(&self) -> Result<Address, Error> {
        access::get_issuer(self.env).ok_or(Error::NotInitialized)
    }

    fn advance(&mut self, next: CampaignState) -> Result<(), Error> {
        if !self.ledger.state.can_advance_to(next) {
            return Err(Error::InvalidTransition);
        }
        self.ledger.state = next;
        Ok(())
    }

    fn persist(&self) {
        storage::save_ledger(self.env, &self.ledger);
    }

    // ─────────────────────────────────────────────────────────
    // Preparing → Active
    // ─────────────────────────────────────────────────────────

    pub fn activate(mut self, now: u64) -> Result<(), Error> {
        if self.ledger.state != CampaignState::Preparing {
            return Err(Error::NotPreparing);
        }
        let inventory = self.allocation.held();
        if inventory <= 0 || inventory < self.config.required_inventory() {
            return Err(Error::InsufficientInventory);
        }

        let deadline = now
            .checked_add(self.config.investing_phase_duration)
            .ok_or(Error::Overflow)?;
        self.ledger.activation_time = now;
        self.ledger.funding_deadline = deadline;
        self.advance(CampaignState::Active)?;
        self.persist();
        storage::extend_instance_lifetime(self.env, self.lifetime(now, deadline));

        events::emit_campaign_activated(self.env, now, deadline, inventory);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Contributions
    // ─────────────────────────────────────────────────────────

    pub fn contribute(mut self, participant: &Address, amount: i128, now: u64) -> Result<ParticipantRecord, Error> {
        if self.ledger.state != CampaignState::Active {
            return Err(Error::NotActive);
        }

        let current = self.investments.record(participant);
        CapPolicy::from_config(&self.config).check(
            current.total_contribution,
            self.ledger.total_raised,
            amount,
        )?;

        let allocation = self.config.allocation_for(amount);
        let lifetime = self.lifetime(now, self.ledger.funding_deadline);
        self.value.pull(participant, amount);
        let record = self.investments.record_contribution(
            &mut self.ledger,
            participant,
            amount,
            allocation,
            lifetime,
        )?;
        events::emit_contribution(
            self.env,
            participant.clone(),
            amount,
            allocation,
            record.total_contribution,
            self.ledger.total_raised,
        );

        if !self.ledger.reached_soft_cap && self.ledger.total_raised >= self.config.soft_cap {
            self.ledger.reached_soft_cap = true;
            events::emit_soft_cap_reached(self.env, self.config.soft_cap, self.ledger.total_raised);
        }
        if self.ledger.total_raised >= self.config.hard_cap {
            self.ledger.reached_hard_cap = true;
            events::emit_hard_cap_reached(self.env, self.config.hard_cap, self.ledger.total_raised);
            self.succeed(now)?;
        }

        self.persist();
        Ok(record)
    }

    // ─────────────────────────────────────────────────────────
    // Tick
    // ─────────────────────────────────────────────────────────

    pub fn due_work(&self, now: u64) -> DueWork {
        match self.ledger.state {
            CampaignState::Active if now >= self.ledger.funding_deadline => DueWork::EndFunding,
            CampaignState::Vesting
                if self.scheduler().period_due(
                    now,
                    self.ledger.vesting_reference_time,
                    self.ledger.vesting_periods_paid,
                ) =>
            {
                DueWork::PayPeriod
            }
            _ => DueWork::Nothing,
        }
    }

    pub fn funding_phase_should_end(&self, now: u64) -> bool {
        self.due_work(now) == DueWork::EndFunding
    }

    pub fn vesting_period_due(&self, now: u64) -> bool {
        self.due_work(now) == DueWork::PayPeriod
    }

    /// When the next vesting period becomes payable, if the campaign is vesting.
    pub fn next_vesting_time(&self) -> Option<u64> {
        if self.ledger.state != CampaignState::Vesting {
            return None;
        }
        self.scheduler().next_period_time(
            self.ledger.vesting_reference_time,
            self.ledger.vesting_periods_paid,
        )
    }

    pub fn tick(mut self, now: u64) -> Result<TickOutcome, Error> {
        let outcome = match self.due_work(now) {
            DueWork::Nothing => return Ok(TickOutcome::NothingDue),
            DueWork::EndFunding => self.end_funding_phase(now)?,
            DueWork::PayPeriod => self.pay_period()?,
        };
        self.persist();
        Ok(outcome)
    }

    fn end_funding_phase(&mut self, now: u64) -> Result<TickOutcome, Error> {
        if self.ledger.total_raised >= self.config.soft_cap {
            self.succeed(now)
        } else {
            self.fail()
        }
    }

    /// Forward the raise and the unsold inventory to the issuer and start the
    /// vesting clock.
    fn succeed(&mut self, now: u64) -> Result<TickOutcome, Error> {
        let issuer = self.issuer()?;
        self.advance(CampaignState::Vesting)?;
        self.ledger.vesting_reference_time = now;

        let lifetime = self.lifetime(now, now);
        storage::extend_instance_lifetime(self.env, lifetime);
        self.investments.extend_lifetime(lifetime);

        self.value.push_all(&issuer);
        let sold = self.ledger.total_allocation_bought;
        let unsold = self.allocation.held().checked_sub(sold).ok_or(Error::Overflow)?.max(0);
        self.allocation.push(&issuer, unsold);

        events::emit_funding_ended(self.env, true, self.ledger.total_raised, sold, unsold);
        Ok(TickOutcome::FundingSucceeded)
    }

    /// Refund every participant in contribution order, zero the ledger and
    /// return the whole inventory to the issuer.
    fn fail(&mut self) -> Result<TickOutcome, Error> {
        let issuer = self.issuer()?;
        self.advance(CampaignState::Refunded)?;
        let raised = self.ledger.total_raised;

        for participant in self.investments.participants() {
            let record = self.investments.record(&participant);
            if record.total_contribution > 0 {
                self.value.push(&participant, record.total_contribution);
                events::emit_participant_refunded(self.env, participant, record.total_contribution);
            }
        }
        self.investments.reset_all(&mut self.ledger);
        let returned = self.allocation.push_all(&issuer);

        events::emit_funding_ended(self.env, false, raised, 0, returned);
        Ok(TickOutcome::FundingFailed)
    }

    /// Pay the next period to every participant.
    fn pay_period(&mut self) -> Result<TickOutcome, Error> {
        let scheduler = self.scheduler();
        let paid = self.ledger.vesting_periods_paid;
        let period = paid.checked_add(1).ok_or(Error::Overflow)?;

        let mut released: i128 = 0;
        let mut recipients: u32 = 0;
        for participant in self.investments.participants() {
            let mut record = self.investments.record(&participant);
            let installment = scheduler.installment(&record, paid)?;
            if installment <= 0 {
                continue;
            }
            self.allocation.push(&participant, installment);
            record.allocation_released = record
                .allocation_released
                .checked_add(installment)
                .ok_or(Error::Overflow)?;
            self.investments.save(&participant, &record);
            released = released.checked_add(installment).ok_or(Error::Overflow)?;
            recipients += 1;
        }

        self.ledger.vesting_periods_paid = period;
        events::emit_period_paid(self.env, period, recipients, released);

        if period >= scheduler.total_periods {
            self.advance(CampaignState::Completed)?;
            events::emit_campaign_completed(self.env, period, self.ledger.total_allocation_bought);
            return Ok(TickOutcome::Completed);
        }
        Ok(TickOutcome::PeriodPaid(period))
    }
}
