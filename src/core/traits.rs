//! Core trait for account persistence
//!
//! This module defines the repository abstraction the service layer is
//! built against, so in-memory and thread-safe implementations can be
//! used interchangeably.

use crate::core::account::Account;
use crate::types::{AccountId, LedgerError};

/// Trait for persisting and retrieving accounts
///
/// Implementations upsert by account id and must persist the full
/// mutated state (balance plus enough log history to answer the
/// daily-limit query on the next read).
///
/// The closure-based `update` and `update_pair` operations exist so that
/// the load-mutate-save sequence of a use case is a single atomic step at
/// the repository boundary: a closure that fails must leave no partial
/// state behind, and for `update_pair` both accounts commit together or
/// not at all.
pub trait AccountRepository {
    /// Store a brand-new account, failing if the id is already taken
    fn create(&mut self, account: Account) -> Result<(), LedgerError>;

    /// Upsert an account by id
    fn save(&mut self, account: Account);

    /// Fetch a snapshot of an account
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no account is stored at `account_id`.
    fn get(&self, account_id: AccountId) -> Result<Account, LedgerError>;

    /// Check whether an account is stored at `account_id`, without side effects
    fn exists(&self, account_id: AccountId) -> bool;

    /// Atomically read, modify, and write one account
    ///
    /// The closure's return value is passed through on success. If the
    /// closure fails, the stored account is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the account does not exist,
    /// or the closure's error.
    fn update<T, F>(&mut self, account_id: AccountId, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<T, LedgerError>;

    /// Atomically read, modify, and write two distinct accounts
    ///
    /// The closure receives the accounts in argument order. Both accounts
    /// are committed together; if the closure fails, neither is changed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransferToSelf`] if both ids are equal,
    /// [`LedgerError::NotFound`] if either account does not exist, or the
    /// closure's error.
    fn update_pair<F>(
        &mut self,
        first: AccountId,
        second: AccountId,
        f: F,
    ) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut Account, &mut Account) -> Result<(), LedgerError>;
}
