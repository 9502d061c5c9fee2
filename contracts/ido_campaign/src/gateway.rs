//! Token movement.
//!
//! The state machine never talks to a token contract directly; it goes
//! through [`AssetMovement`], one instance for the payment token and one for
//! the sale token. Every call is all-or-nothing: a failed transfer traps and
//! the whole invocation is rolled back by the host.

use soroban_sdk::{token, Address, Env};

pub trait AssetMovement {
    /// Balance held by `holder`.
    fn balance(&self, holder: &Address) -> i128;

    /// Balance held by this contract.
    fn held(&self) -> i128;

    /// Move `amount` from `from` into this contract. `from` must have authorised.
    fn pull(&self, from: &Address, amount: i128);

    /// Move `amount` from this contract to `to`. Zero amounts are skipped.
    fn push(&self, to: &Address, amount: i128);

    /// Move everything this contract holds to `to`; returns the amount moved.
    fn push_all(&self, to: &Address) -> i128 {
        let amount = self.held();
        self.push(to, amount);
        amount
    }
}

/// [`AssetMovement`] over a SEP-41 token contract.
pub struct TokenGateway<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> TokenGateway<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        TokenGateway {
            env,
            client: token::Client::new(env, token),
        }
    }
}

impl AssetMovement for TokenGateway<'_> {
    fn balance(&self, holder: &Address) -> i128 {
        self.client.balance(holder)
    }

    fn held(&self) -> i128 {
        self.balance(&self.env.current_contract_address())
    }

    fn pull(&self, from: &Address, amount: i128) {
        if amount > 0 {
            self.client
                .transfer(from, &self.env.current_contract_address(), &amount);
        }
    }

    fn push(&self, to: &Address, amount: i128) {
        if amount > 0 {
            self.client
                .transfer(&self.env.current_contract_address(), to, &amount);
        }
    }
}
