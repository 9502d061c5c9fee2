//! # Access control
//!
//! The campaign has exactly one privileged identity, the **issuer**. It is
//! set by `init` and can only change hands through [`transfer_issuer`].
//!
//! ## Storage layout
//!
//! - `AccessKey::Issuer` → `Address`
//!
//! ## Event emissions
//!
//! | Event topic prefix | Trigger |
//! |--------------------|---------|
//! | `issuer`           | Issuer set at init or transferred |
//!
//! The privileged entry points (`activate`, `pause`, `unpause`,
//! `transfer_issuer`) go through the [`AccessControl`] capability so the state
//! machine never inspects storage keys owned by this module.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessKey {
    Issuer,
}

/// Capability checked before any privileged entry point.
pub trait AccessControl {
    /// Fail with `Error::NotAuthorized` unless `caller` is the issuer.
    fn require_issuer(&self, caller: &Address) -> Result<(), Error>;
}

/// [`AccessControl`] backed by the issuer stored in this contract.
pub struct IssuerGuard<'a> {
    env: &'a Env,
}

impl<'a> IssuerGuard<'a> {
    pub fn new(env: &'a Env) -> Self {
        IssuerGuard { env }
    }
}

impl AccessControl for IssuerGuard<'_> {
    fn require_issuer(&self, caller: &Address) -> Result<(), Error> {
        match get_issuer(self.env) {
            Some(ref issuer) if issuer == caller => Ok(()),
            Some(_) => Err(Error::NotAuthorized),
            None => Err(Error::NotInitialized),
        }
    }
}

pub fn get_issuer(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AccessKey::Issuer)
}

/// Set the first issuer. Fails with `Error::AlreadyInitialized` if one exists.
pub fn init_issuer(env: &Env, issuer: &Address) -> Result<(), Error> {
    if env.storage().instance().has(&AccessKey::Issuer) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage().instance().set(&AccessKey::Issuer, issuer);
    emit(env, issuer, None);
    Ok(())
}

/// Hand the issuer role from `current` to `new`.
///
/// `current` must be the issuer. Proceeds of the campaign and returned
/// inventory go to whoever holds the role when the funding phase ends.
pub fn transfer_issuer(env: &Env, current: &Address, new: &Address) -> Result<(), Error> {
    IssuerGuard::new(env).require_issuer(current)?;
    env.storage().instance().set(&AccessKey::Issuer, new);
    emit(env, new, Some(current.clone()));
    Ok(())
}

/// Topic: `(issuer, new_issuer)`
/// Data:  `Option<previous_issuer>`
fn emit(env: &Env, issuer: &Address, by: Option<Address>) {
    env.events()
        .publish((symbol_short!("issuer"), issuer.clone()), by);
}
