use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignInitialized {
    pub issuer: Address,
    pub payment_token: Address,
    pub sale_token: Address,
    pub soft_cap: i128,
    pub hard_cap: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignActivated {
    pub activation_time: u64,
    pub funding_deadline: u64,
    pub inventory: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRecorded {
    pub participant: Address,
    pub amount: i128,
    pub allocation: i128,
    pub total_contribution: i128,
    pub total_raised: i128,
}

/// Payload of both `soft_cap` and `hard_cap`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapReached {
    pub cap: i128,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingEnded {
    pub succeeded: bool,
    pub total_raised: i128,
    pub allocation_sold: i128,
    pub allocation_returned: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantRefunded {
    pub participant: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodPaid {
    pub period: u32,
    pub participants: u32,
    pub released: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCompleted {
    pub periods_paid: u32,
    pub allocation_sold: i128,
}

pub fn emit_campaign_initialized(
    env: &Env,
    issuer: Address,
    payment_token: Address,
    sale_token: Address,
    soft_cap: i128,
    hard_cap: i128,
) {
    let data = CampaignInitialized {
        issuer,
        payment_token,
        sale_token,
        soft_cap,
        hard_cap,
    };
    env.events().publish((symbol_short!("init"),), data);
}

pub fn emit_campaign_activated(env: &Env, activation_time: u64, funding_deadline: u64, inventory: i128) {
    let data = CampaignActivated {
        activation_time,
        funding_deadline,
        inventory,
    };
    env.events().publish((symbol_short!("activated"),), data);
}

pub fn emit_contribution(
    env: &Env,
    participant: Address,
    amount: i128,
    allocation: i128,
    total_contribution: i128,
    total_raised: i128,
) {
    let topics = (symbol_short!("contrib"), participant.clone());
    let data = ContributionRecorded {
        participant,
        amount,
        allocation,
        total_contribution,
        total_raised,
    };
    env.events().publish(topics, data);
}

pub fn emit_soft_cap_reached(env: &Env, cap: i128, total_raised: i128) {
    env.events()
        .publish((symbol_short!("soft_cap"),), CapReached { cap, total_raised });
}

pub fn emit_hard_cap_reached(env: &Env, cap: i128, total_raised: i128) {
    env.events()
        .publish((symbol_short!("hard_cap"),), CapReached { cap, total_raised });
}

pub fn emit_funding_ended(
    env: &Env,
    succeeded: bool,
    total_raised: i128,
    allocation_sold: i128,
    allocation_returned: i128,
) {
    let data = FundingEnded {
        succeeded,
        total_raised,
        allocation_sold,
        allocation_returned,
    };
    env.events().publish((symbol_short!("fund_end"),), data);
}

pub fn emit_participant_refunded(env: &Env, participant: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), participant.clone());
    env.events()
        .publish(topics, ParticipantRefunded { participant, amount });
}

pub fn emit_period_paid(env: &Env, period: u32, participants: u32, released: i128) {
    let topics = (symbol_short!("vested"), period);
    let data = PeriodPaid {
        period,
        participants,
        released,
    };
    env.events().publish(topics, data);
}

pub fn emit_campaign_completed(env: &Env, periods_paid: u32, allocation_sold: i128) {
    let data = CampaignCompleted {
        periods_paid,
        allocation_sold,
    };
    env.events().publish((symbol_short!("completed"),), data);
}

pub fn emit_paused(env: &Env, caller: Address) {
    env.events().publish((symbol_short!("paused"),), caller);
}

pub fn emit_unpaused(env: &Env, caller: Address) {
    env.events().publish((symbol_short!("unpaused"),), caller);
}
