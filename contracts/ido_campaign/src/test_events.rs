extern crate std;

use soroban_sdk::{symbol_short, testutils::Events, vec, IntoVal, TryIntoVal};

use crate::events::{CapReached, ContributionRecorded, FundingEnded, PeriodPaid};
use crate::test_support::Fixture;
use crate::TickOutcome;

#[test]
fn test_contribution_event() {
    let f = Fixture::active(|_| {});
    let participant = f.participant(10_000);
    f.client.contribute(&participant, &2_500);

    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("contrib"), participant)
    assert_eq!(last_event.0, f.client.address);
    let expected_topics = vec![
        &f.env,
        symbol_short!("contrib").into_val(&f.env),
        participant.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let data: ContributionRecorded = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        data,
        ContributionRecorded {
            participant: participant.clone(),
            amount: 2_500,
            allocation: 2,
            total_contribution: 2_500,
            total_raised: 2_500,
        }
    );
}

#[test]
fn test_soft_cap_event_emitted_once() {
    let f = Fixture::active(|p| p.max_contribution = 1_000_000_000);
    let participant = f.participant(1_000_000_000);

    f.client.contribute(&participant, &100_000_000);
    let topics = f.event_topics();
    assert!(topics.contains(&symbol_short!("soft_cap")));

    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let data: CapReached = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        data,
        CapReached {
            cap: 100_000_000,
            total_raised: 100_000_000,
        }
    );

    // Crossing again does not re-announce: the contribution is the last event.
    f.client.contribute(&participant, &1_000);
    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &f.env,
        symbol_short!("contrib").into_val(&f.env),
        participant.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);
}

#[test]
fn test_hard_cap_contribution_emits_cap_and_phase_end() {
    let f = Fixture::active(|p| p.max_contribution = 1_000_000_000);
    let participant = f.participant(1_000_000_000);

    f.client.contribute(&participant, &500_000_000);

    let topics = f.event_topics();
    let position = |name| topics.iter().position(|t| *t == name);
    let contrib = position(symbol_short!("contrib")).expect("contribution event");
    let soft = position(symbol_short!("soft_cap")).expect("soft cap event");
    let hard = position(symbol_short!("hard_cap")).expect("hard cap event");
    let ended = position(symbol_short!("fund_end")).expect("funding ended event");
    assert!(contrib < soft && soft < hard && hard < ended);

    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.0, f.client.address);
    let data: FundingEnded = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        data,
        FundingEnded {
            succeeded: true,
            total_raised: 500_000_000,
            allocation_sold: 500_000,
            allocation_returned: 0,
        }
    );
}

#[test]
fn test_refund_events() {
    let f = Fixture::active(|_| {});
    let a = f.participant(1_000_000);
    let b = f.participant(1_000_000);
    f.client.contribute(&a, &1_000_000);
    f.client.contribute(&b, &500_000);

    f.advance_days(30);
    assert_eq!(f.client.tick(), TickOutcome::FundingFailed);

    let topics = f.event_topics();
    assert_eq!(
        topics.iter().filter(|t| **t == symbol_short!("refunded")).count(),
        2
    );

    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let data: FundingEnded = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        data,
        FundingEnded {
            succeeded: false,
            total_raised: 1_500_000,
            allocation_sold: 0,
            allocation_returned: 500_000,
        }
    );
}

#[test]
fn test_period_paid_and_completed_events() {
    let f = Fixture::active(|p| {
        p.soft_cap = 1_000_000;
        p.vesting_total_periods = 1;
        p.vesting_period_percentage = 100;
    });
    let participant = f.participant(5_000_000);
    f.client.contribute(&participant, &5_000_000);
    f.advance_days(30);
    f.client.tick();

    f.advance_days(60);
    assert_eq!(f.client.tick(), TickOutcome::Completed);

    let topics = f.event_topics();
    let vested = topics
        .iter()
        .position(|t| *t == symbol_short!("vested"))
        .expect("period paid event");
    let completed = topics
        .iter()
        .position(|t| *t == symbol_short!("completed"))
        .expect("completed event");
    assert!(vested < completed);

    let all_events = f.env.events().all();
    let period_event = all_events
        .iter()
        .find(|e| {
            e.0 == f.client.address
                && e.1
                    == vec![
                        &f.env,
                        symbol_short!("vested").into_val(&f.env),
                        1u32.into_val(&f.env),
                    ]
        })
        .expect("period paid event");
    let data: PeriodPaid = period_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        data,
        PeriodPaid {
            period: 1,
            participants: 1,
            released: 5_000,
        }
    );
}
