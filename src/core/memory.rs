//! In-memory account repository
//!
//! This module provides `InMemoryAccountRepository`, a HashMap-backed
//! implementation of [`AccountRepository`] for single-threaded use and
//! for tests.
//!
//! Mutating operations stage their work on clones and commit only on
//! success, so a failed use case never leaves a partially persisted
//! account behind.

use crate::core::account::Account;
use crate::core::traits::AccountRepository;
use crate::types::{AccountId, LedgerError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// HashMap-backed account repository
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: HashMap<AccountId, Account>,
}

impl InMemoryAccountRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        InMemoryAccountRepository {
            accounts: HashMap::new(),
        }
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the repository holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn create(&mut self, account: Account) -> Result<(), LedgerError> {
        match self.accounts.entry(account.id()) {
            Entry::Occupied(_) => Err(LedgerError::cannot_create_account(account.id())),
            Entry::Vacant(entry) => {
                entry.insert(account);
                Ok(())
            }
        }
    }

    fn save(&mut self, account: Account) {
        self.accounts.insert(account.id(), account);
    }

    fn get(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        self.accounts
            .get(&account_id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(account_id))
    }

    fn exists(&self, account_id: AccountId) -> bool {
        self.accounts.contains_key(&account_id)
    }

    fn update<T, F>(&mut self, account_id: AccountId, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<T, LedgerError>,
    {
        let mut account = self.get(account_id)?;
        let out = f(&mut account)?;
        self.accounts.insert(account_id, account);
        Ok(out)
    }

    fn update_pair<F>(
        &mut self,
        first: AccountId,
        second: AccountId,
        f: F,
    ) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut Account, &mut Account) -> Result<(), LedgerError>,
    {
        if first == second {
            return Err(LedgerError::transfer_to_self(first));
        }

        let mut first_account = self.get(first)?;
        let mut second_account = self.get(second)?;

        f(&mut first_account, &mut second_account)?;

        self.accounts.insert(first, first_account);
        self.accounts.insert(second, second_account);

        Ok(())
    }
}
