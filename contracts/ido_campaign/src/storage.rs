//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the campaign.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                | Type             | Description                          |
//! |--------------------|------------------|--------------------------------------|
//! | `Config`           | `CampaignConfig` | Immutable campaign configuration     |
//! | `Ledger`           | `LedgerState`    | Phase, totals, flags, time anchors   |
//! | `Paused`           | `bool`           | Contribution gate                    |
//! | `ParticipantCount` | `u32`            | Length of the participant index      |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type                | Description                          |
//! |----------------------|---------------------|--------------------------------------|
//! | `Record(addr)`       | `ParticipantRecord` | Contribution and allocation totals   |
//! | `ParticipantAt(i)`   | `Address`           | i-th distinct contributor            |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Campaign lifetime
//!
//! Participant entries sit untouched from a participant's last contribution
//! until the first vesting sweep, which can be months away. The rolling bumps
//! above cannot cover that gap, so the lifecycle also extends the instance and
//! every participant entry to the end of the vesting schedule (plus one
//! persistent bump of slack) via [`lifetime_ledgers`]. The network maximum TTL
//! caps the extension.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{CampaignConfig, LedgerState, ParticipantRecord};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Fastest ledger close assumed when converting seconds into ledgers.
const LEDGER_CLOSE_SECONDS: u64 = 5;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable campaign configuration (Instance).
    Config,
    /// Mutable campaign accounting (Instance).
    Ledger,
    /// Contribution gate (Instance).
    Paused,
    /// Number of distinct participants (Instance).
    ParticipantCount,
    /// Participant record keyed by address (Persistent).
    Record(Address),
    /// Participant address keyed by first-contribution order (Persistent).
    ParticipantAt(u32),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// TTL in ledgers that keeps an entry live for `seconds` from now, plus one
/// persistent bump of slack, capped at the network maximum.
pub fn lifetime_ledgers(env: &Env, seconds: u64) -> u32 {
    let max = env.storage().max_ttl();
    let ledgers = (seconds / LEDGER_CLOSE_SECONDS).saturating_add(u64::from(PERSISTENT_BUMP_AMOUNT));
    u32::try_from(ledgers).map_or(max, |ledgers| ledgers.min(max))
}

/// Keep the instance (config, ledger, issuer, index length) live for at
/// least `ledgers`.
pub fn extend_instance_lifetime(env: &Env, ledgers: u32) {
    env.storage().instance().extend_ttl(ledgers, ledgers);
}

/// Keep the `index`-th participant's index entry and record live for at
/// least `ledgers`. Both entries must exist.
pub fn extend_participant_lifetime(env: &Env, index: u32, participant: &Address, ledgers: u32) {
    let persistent = env.storage().persistent();
    persistent.extend_ttl(&DataKey::ParticipantAt(index), ledgers, ledgers);
    persistent.extend_ttl(&DataKey::Record(participant.clone()), ledgers, ledgers);
}

// ── Config & ledger ──────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Write the configuration and the initial `Preparing` ledger.
pub fn save_new_campaign(env: &Env, config: &CampaignConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .set(&DataKey::Ledger, &LedgerState::new());
    env.storage().instance().set(&DataKey::ParticipantCount, &0u32);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> Result<CampaignConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn load_ledger(env: &Env) -> Result<LedgerState, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Ledger)
        .ok_or(Error::NotInitialized)
}

pub fn save_ledger(env: &Env, ledger: &LedgerState) {
    env.storage().instance().set(&DataKey::Ledger, ledger);
    bump_instance(env);
}

// ── Pause flag ───────────────────────────────────────────────────────

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    bump_instance(env);
}

// ── Participants ─────────────────────────────────────────────────────

pub fn has_record(env: &Env, participant: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Record(participant.clone()))
}

/// Load the record for `participant`, or an all-zero record if they never
/// contributed.
pub fn load_record(env: &Env, participant: &Address) -> ParticipantRecord {
    let key = DataKey::Record(participant.clone());
    match env.storage().persistent().get(&key) {
        Some(record) => {
            bump_persistent(env, &key);
            record
        }
        None => ParticipantRecord::default(),
    }
}

pub fn save_record(env: &Env, participant: &Address, record: &ParticipantRecord) {
    let key = DataKey::Record(participant.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn participant_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ParticipantCount)
        .unwrap_or(0)
}

pub fn participant_at(env: &Env, index: u32) -> Option<Address> {
    let key = DataKey::ParticipantAt(index);
    let participant = env.storage().persistent().get(&key);
    if participant.is_some() {
        bump_persistent(env, &key);
    }
    participant
}

/// Append `participant` to the ordered index. Callers guarantee it is not
/// already present.
pub fn push_participant(env: &Env, participant: &Address) -> Result<u32, Error> {
    let index = participant_count(env);
    let key = DataKey::ParticipantAt(index);
    env.storage().persistent().set(&key, participant);
    bump_persistent(env, &key);

    let next = index.checked_add(1).ok_or(Error::Overflow)?;
    env.storage()
        .instance()
        .set(&DataKey::ParticipantCount, &next);
    Ok(index)
}
