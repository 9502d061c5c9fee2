use soroban_sdk::testutils::storage::{Instance as _, Persistent as _};
use soroban_sdk::Address;

use crate::storage::DataKey;
use crate::test_support::{Fixture, DAY_IN_LEDGERS};
use crate::{CampaignState, TickOutcome};

/// Remaining TTL of the instance, the `index`-th index entry and the
/// participant's record.
fn entry_ttls(f: &Fixture, index: u32, participant: &Address) -> (u32, u32, u32) {
    f.env.as_contract(&f.client.address, || {
        let persistent = f.env.storage().persistent();
        (
            f.env.storage().instance().get_ttl(),
            persistent.get_ttl(&DataKey::ParticipantAt(index)),
            persistent.get_ttl(&DataKey::Record(participant.clone())),
        )
    })
}

/// Touch every token entry the payout path reads, as ordinary token traffic
/// would on the network.
fn keep_tokens_live(f: &Fixture, participant: &Address) {
    f.sale.balance(&f.client.address);
    f.sale.balance(participant);
    f.payment.balance(&f.client.address);
}

#[test]
fn test_contribution_keeps_entries_until_schedule_end() {
    let f = Fixture::active(|p| p.soft_cap = 2_000_000);
    let participant = f.participant(2_000_000);
    f.client.contribute(&participant, &2_000_000);

    // 30-day window + 30-day cliff + ten 30-day periods.
    let (instance, index, record) = entry_ttls(&f, 0, &participant);
    assert!(instance >= 360 * DAY_IN_LEDGERS);
    assert!(index >= 360 * DAY_IN_LEDGERS);
    assert!(record >= 360 * DAY_IN_LEDGERS);
}

#[test]
fn test_success_extends_entries_over_vesting() {
    let f = Fixture::active(|p| p.soft_cap = 2_000_000);
    let early = f.participant(2_000_000);
    f.client.contribute(&early, &2_000_000);
    for _ in 0..29 {
        f.pass_days(1);
        keep_tokens_live(&f, &early);
    }
    let late = f.participant(1_000_000);
    f.client.contribute(&late, &1_000_000);

    f.pass_days(1);
    keep_tokens_live(&f, &early);
    assert_eq!(f.client.tick(), TickOutcome::FundingSucceeded);

    for (index, participant) in [(0u32, &early), (1u32, &late)] {
        let (instance, index_ttl, record) = entry_ttls(&f, index, participant);
        assert!(instance >= 330 * DAY_IN_LEDGERS);
        assert!(index_ttl >= 330 * DAY_IN_LEDGERS);
        assert!(record >= 330 * DAY_IN_LEDGERS);
    }
}

#[test]
fn test_daily_keeper_pays_every_period_as_ledgers_close() {
    let f = Fixture::active(|p| p.soft_cap = 2_000_000);
    let participant = f.participant(2_000_000);
    f.client.contribute(&participant, &2_000_000);

    for day in 1..=360u32 {
        f.pass_days(1);
        keep_tokens_live(&f, &participant);

        let expected = match day {
            30 => TickOutcome::FundingSucceeded,
            360 => TickOutcome::Completed,
            d if d >= 90 && (d - 60) % 30 == 0 => TickOutcome::PeriodPaid((d - 60) / 30),
            _ => TickOutcome::NothingDue,
        };
        assert_eq!(f.client.tick(), expected, "day {}", day);
    }

    assert_eq!(f.client.state(), CampaignState::Completed);
    assert_eq!(f.client.ledger().vesting_periods_paid, 10);
    assert_eq!(f.sale.balance(&participant), 2_000);
    assert_eq!(f.client.record(&participant).allocation_released, 2_000);
}
