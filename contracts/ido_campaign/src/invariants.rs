#![allow(dead_code)]

extern crate std;

use crate::test_support::Fixture;
use crate::types::{CampaignState, LedgerState};

/// INV-1: `total_raised` equals the sum of every participant's contribution,
/// and `total_allocation_bought` the sum of their allocations.
pub fn assert_totals_match_records(fixture: &Fixture) {
    let ledger = fixture.client.ledger();
    let mut raised = 0i128;
    let mut bought = 0i128;
    for i in 0..fixture.client.participant_count() {
        let participant = fixture.client.participant_at(&i).unwrap();
        let record = fixture.client.record(&participant);
        raised += record.total_contribution;
        bought += record.total_allocation_bought;
    }
    assert_eq!(
        ledger.total_raised, raised,
        "INV-1 violated: total_raised {} != sum of contributions {}",
        ledger.total_raised, raised
    );
    assert_eq!(
        ledger.total_allocation_bought, bought,
        "INV-1 violated: total_allocation_bought {} != sum of allocations {}",
        ledger.total_allocation_bought, bought
    );
}

/// INV-2: no participant is above the personal maximum.
pub fn assert_within_personal_cap(fixture: &Fixture) {
    let max = fixture.client.config().max_contribution;
    for i in 0..fixture.client.participant_count() {
        let participant = fixture.client.participant_at(&i).unwrap();
        let record = fixture.client.record(&participant);
        assert!(
            (0..=max).contains(&record.total_contribution),
            "INV-2 violated: contribution {} outside [0, {}]",
            record.total_contribution,
            max
        );
    }
}

/// INV-3: `reached_hard_cap` implies the raise is exactly the hard cap and the
/// funding phase is over.
pub fn assert_hard_cap_consistent(fixture: &Fixture, ledger: &LedgerState) {
    if ledger.reached_hard_cap {
        assert_eq!(
            ledger.total_raised,
            fixture.client.config().hard_cap,
            "INV-3 violated: hard cap flagged with total_raised {}",
            ledger.total_raised
        );
        assert_ne!(
            ledger.state,
            CampaignState::Active,
            "INV-3 violated: hard cap flagged while still Active"
        );
    }
}

/// INV-4: `vesting_periods_paid` stays within the schedule and completion
/// coincides with the last period.
pub fn assert_periods_bounded(fixture: &Fixture, ledger: &LedgerState) {
    let total = fixture.client.config().vesting_total_periods;
    assert!(
        ledger.vesting_periods_paid <= total,
        "INV-4 violated: {} periods paid of {}",
        ledger.vesting_periods_paid,
        total
    );
    assert_eq!(
        ledger.vesting_periods_paid == total,
        ledger.state == CampaignState::Completed,
        "INV-4 violated: {} periods paid in state {:?}",
        ledger.vesting_periods_paid,
        ledger.state
    );
}

/// INV-5: only forward transitions.
pub fn assert_valid_transition(from: CampaignState, to: CampaignState) {
    assert!(
        from == to || from.can_advance_to(to),
        "INV-5 violated: invalid transition from {:?} to {:?}",
        from,
        to
    );
}

pub fn assert_all_invariants(fixture: &Fixture) {
    let ledger = fixture.client.ledger();
    assert_totals_match_records(fixture);
    assert_within_personal_cap(fixture);
    assert_hard_cap_consistent(fixture, &ledger);
    assert_periods_bounded(fixture, &ledger);
}
