//! # Investment ledger
//!
//! Authoritative participant → position map, the ordered index of distinct
//! participants, and the campaign-wide totals carried in [`LedgerState`].
//!
//! Invariants kept here:
//!
//! - `LedgerState::total_raised` equals the sum of every record's
//!   `total_contribution`.
//! - `LedgerState::total_allocation_bought` equals the sum of every record's
//!   `total_allocation_bought`.
//! - A participant is appended to the index on their first contribution and
//!   never again; index order is first-contribution order.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::types::{LedgerState, ParticipantRecord};
use crate::Error;

pub struct InvestmentLedger<'a> {
    env: &'a Env,
}

impl<'a> InvestmentLedger<'a> {
    pub fn new(env: &'a Env) -> Self {
        InvestmentLedger { env }
    }

    pub fn record(&self, participant: &Address) -> ParticipantRecord {
        storage::load_record(self.env, participant)
    }

    pub fn save(&self, participant: &Address, record: &ParticipantRecord) {
        storage::save_record(self.env, participant, record);
    }

    /// Add `amount` (buying `allocation` units) to `participant`'s position and
    /// to the campaign totals. Returns the updated record.
    ///
    /// A first-time participant's entries are kept live for `lifetime` ledgers.
    pub fn record_contribution(
        &self,
        totals: &mut LedgerState,
        participant: &Address,
        amount: i128,
        allocation: i128,
        lifetime: u32,
    ) -> Result<ParticipantRecord, Error> {
        let new_index = if storage::has_record(self.env, participant) {
            None
        } else {
            Some(storage::push_participant(self.env, participant)?)
        };

        let mut record = self.record(participant);
        record.total_contribution = record
            .total_contribution
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        record.total_allocation_bought = record
            .total_allocation_bought
            .checked_add(allocation)
            .ok_or(Error::Overflow)?;

        totals.total_raised = totals
            .total_raised
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        totals.total_allocation_bought = totals
            .total_allocation_bought
            .checked_add(allocation)
            .ok_or(Error::Overflow)?;

        self.save(participant, &record);
        if let Some(index) = new_index {
            storage::extend_participant_lifetime(self.env, index, participant, lifetime);
        }
        Ok(record)
    }

    /// Keep every participant's index entry and record live for at least
    /// `lifetime` ledgers.
    pub fn extend_lifetime(&self, lifetime: u32) {
        for index in 0..storage::participant_count(self.env) {
            if let Some(participant) = storage::participant_at(self.env, index) {
                storage::extend_participant_lifetime(self.env, index, &participant, lifetime);
            }
        }
    }

    /// Zero every participant's contribution and allocation, and the totals
    /// and cap flags with them. The participant index is left untouched.
    pub fn reset_all(&self, totals: &mut LedgerState) {
        for participant in self.participants() {
            let mut record = self.record(&participant);
            record.total_contribution = 0;
            record.total_allocation_bought = 0;
            self.save(&participant, &record);
        }
        totals.total_raised = 0;
        totals.total_allocation_bought = 0;
        totals.reached_soft_cap = false;
        totals.reached_hard_cap = false;
    }

    /// Distinct participants in first-contribution order.
    pub fn participants(&self) -> Participants<'a> {
        Participants {
            env: self.env,
            next: 0,
            len: storage::participant_count(self.env),
        }
    }
}

/// Iterator over the participant index. Each call to
/// [`InvestmentLedger::participants`] starts from the beginning.
pub struct Participants<'a> {
    env: &'a Env,
    next: u32,
    len: u32,
}

impl Iterator for Participants<'_> {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        while self.next < self.len {
            let index = self.next;
            self.next += 1;
            if let Some(participant) = storage::participant_at(self.env, index) {
                return Some(participant);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.next) as usize;
        (0, Some(remaining))
    }
}
