//! Thread-safe account repository
//!
//! This module provides `SharedAccountRepository`, a concurrent
//! implementation of [`AccountRepository`] backed by a `DashMap` of
//! per-account mutexes.
//!
//! # Design
//!
//! Every account lives behind its own mutex, held for the duration of a
//! load-mutate-save sequence. Two-account updates acquire the locks in a
//! fixed id order, so concurrent transfers that reference the same pair
//! of accounts in opposite directions cannot deadlock, and the balance
//! and daily-limit checks cannot race against a concurrent debit.
//!
//! Cloning the repository yields another handle to the same underlying
//! store, which is how it is shared across threads.

use crate::core::account::Account;
use crate::core::traits::AccountRepository;
use crate::types::{AccountId, LedgerError};
use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Concurrent account repository with per-account locking
#[derive(Debug, Clone, Default)]
pub struct SharedAccountRepository {
    accounts: Arc<DashMap<AccountId, Arc<Mutex<Account>>>>,
}

fn lock(cell: &Mutex<Account>) -> MutexGuard<'_, Account> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SharedAccountRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        SharedAccountRepository {
            accounts: Arc::new(DashMap::new()),
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

    fn cell(&self, account_id: AccountId) -> Result<Arc<Mutex<Account>>, LedgerError> {
        self.accounts
            .get(&account_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::not_found(account_id))
    }
}

impl AccountRepository for SharedAccountRepository {
    fn create(&mut self, account: Account) -> Result<(), LedgerError> {
        let id = account.id();
        let currency = account.currency();
        let mut staged = Some(account);

        self.accounts.entry(id).or_insert_with(|| {
            Arc::new(Mutex::new(
                staged.take().unwrap_or_else(|| Account::new(id, currency)),
            ))
        });

        // The closure consumed the staged account iff the id was free
        if staged.is_some() {
            return Err(LedgerError::cannot_create_account(id));
        }
        Ok(())
    }

    fn save(&mut self, account: Account) {
        match self.accounts.get(&account.id()) {
            Some(entry) => {
                *lock(entry.value()) = account;
            }
            None => {
                self.accounts
                    .insert(account.id(), Arc::new(Mutex::new(account)));
            }
        }
    }

    fn get(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        let cell = self.cell(account_id)?;
        let guard = lock(&cell);
        Ok(guard.clone())
    }

    fn exists(&self, account_id: AccountId) -> bool {
        self.accounts.contains_key(&account_id)
    }

    fn update<T, F>(&mut self, account_id: AccountId, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<T, LedgerError>,
    {
        let cell = self.cell(account_id)?;
        let mut guard = lock(&cell);

        // Stage the mutation on a copy; a failed closure must not leave
        // partial state behind.
        let mut staged = guard.clone();
        let out = f(&mut staged)?;
        *guard = staged;

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

        let first_cell = self.cell(first)?;
        let second_cell = self.cell(second)?;

        // Fixed id order prevents deadlock between opposite-direction
        // transfers over the same pair.
        let (mut first_guard, mut second_guard) = if first < second {
            let first_guard = lock(&first_cell);
            let second_guard = lock(&second_cell);
            (first_guard, second_guard)
        } else {
            let second_guard = lock(&second_cell);
            let first_guard = lock(&first_cell);
            (first_guard, second_guard)
        };

        let mut staged_first = first_guard.clone();
        let mut staged_second = second_guard.clone();

        f(&mut staged_first, &mut staged_second)?;

        *first_guard = staged_first;
        *second_guard = staged_second;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Currency, Money};
    use std::thread;
    use uuid::Uuid;

    fn funded_account(amount: i64) -> Account {
        let mut account = Account::new(Uuid::new_v4(), Currency::Eur);
        account.credit(&Money::new(amount, Currency::Eur)).unwrap();
        account
    }

    #[test]
    fn test_create_and_get() {
        let mut repository = SharedAccountRepository::new();
        let account = Account::new(Uuid::new_v4(), Currency::Pln);
        let id = account.id();

        repository.create(account).unwrap();

        assert!(repository.exists(id));
        assert_eq!(
            repository.get(id).unwrap().balance(),
            Money::zero(Currency::Pln)
        );
    }

    #[test]
    fn test_create_rejects_existing_id() {
        let mut repository = SharedAccountRepository::new();
        let account = Account::new(Uuid::new_v4(), Currency::Pln);

        repository.create(account.clone()).unwrap();
        let result = repository.create(account);

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::CannotCreateAccount { .. }
        ));
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn test_get_unknown_id_fails() {
        let repository = SharedAccountRepository::new();

        let result = repository.get(Uuid::new_v4());

        assert!(matches!(result.unwrap_err(), LedgerError::NotFound { .. }));
    }

    #[test]
    fn test_save_upserts_in_place() {
        let mut repository = SharedAccountRepository::new();
        let account = funded_account(1000);
        let id = account.id();

        repository.save(account.clone());
        repository.save(account);

        assert_eq!(repository.len(), 1);
        assert_eq!(
            repository.get(id).unwrap().balance(),
            Money::new(1000, Currency::Eur)
        );
    }

    #[test]
    fn test_update_persists_nothing_on_failure() {
        let mut repository = SharedAccountRepository::new();
        let account = funded_account(1000);
        let id = account.id();
        repository.save(account);

        let result: Result<(), _> = repository.update(id, |account| {
            account.credit(&Money::new(500, Currency::Eur))?;
            Err(LedgerError::arithmetic_overflow("test"))
        });

        assert!(result.is_err());
        assert_eq!(
            repository.get(id).unwrap().balance(),
            Money::new(1000, Currency::Eur)
        );
    }

    #[test]
    fn test_clones_share_the_store() {
        let mut repository = SharedAccountRepository::new();
        let mut clone = repository.clone();

        let account = funded_account(1000);
        let id = account.id();
        repository.save(account);

        clone
            .update(id, |account| account.credit(&Money::new(500, Currency::Eur)))
            .unwrap();

        assert_eq!(
            repository.get(id).unwrap().balance(),
            Money::new(1500, Currency::Eur)
        );
    }

    #[test]
    fn test_concurrent_deposits_are_not_lost() {
        let repository = SharedAccountRepository::new();
        let account = Account::new(Uuid::new_v4(), Currency::Eur);
        let id = account.id();
        repository.clone().save(account);

        let mut handles = vec![];
        for _ in 0..8 {
            let mut repository = repository.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..25 {
                    repository
                        .update(id, |account| account.credit(&Money::new(10, Currency::Eur)))
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // 8 threads * 25 credits * 10 units
        assert_eq!(
            repository.get(id).unwrap().balance(),
            Money::new(2000, Currency::Eur)
        );
        assert_eq!(repository.get(id).unwrap().logs().len(), 200);
    }

    #[test]
    fn test_concurrent_debits_respect_the_daily_limit() {
        let repository = SharedAccountRepository::new();
        let source = funded_account(10_000);
        let destination = funded_account(10_000);
        let (source_id, destination_id) = (source.id(), destination.id());
        repository.clone().save(source);
        repository.clone().save(destination);

        let mut handles = vec![];
        for _ in 0..6 {
            let mut repository = repository.clone();
            handles.push(thread::spawn(move || {
                repository.update_pair(source_id, destination_id, |source, destination| {
                    source.debit(destination, &Money::new(100, Currency::Eur))
                })
            }));
        }

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        assert_eq!(successes, 3);
        for failed in outcomes.iter().filter(|outcome| outcome.is_err()) {
            assert!(matches!(
                failed,
                Err(LedgerError::DailyTransactionLimitAchieved { .. })
            ));
        }

        // Each success moved 100 + 1 commission; the pair total is conserved
        let source_balance = repository.get(source_id).unwrap().balance().amount();
        let destination_balance = repository.get(destination_id).unwrap().balance().amount();
        assert_eq!(source_balance, 10_000 - 3 * 101);
        assert_eq!(destination_balance, 10_000 + 3 * 101);
    }

    #[test]
    fn test_opposite_direction_transfers_do_not_deadlock() {
        let repository = SharedAccountRepository::new();
        let first = funded_account(10_000);
        let second = funded_account(10_000);
        let (first_id, second_id) = (first.id(), second.id());
        repository.clone().save(first);
        repository.clone().save(second);

        let forward = {
            let mut repository = repository.clone();
            thread::spawn(move || {
                for _ in 0..3 {
                    repository
                        .update_pair(first_id, second_id, |source, destination| {
                            source.debit(destination, &Money::new(100, Currency::Eur))
                        })
                        .unwrap();
                }
            })
        };
        let backward = {
            let mut repository = repository.clone();
            thread::spawn(move || {
                for _ in 0..3 {
                    repository
                        .update_pair(second_id, first_id, |source, destination| {
                            source.debit(destination, &Money::new(100, Currency::Eur))
                        })
                        .unwrap();
                }
            })
        };
        forward.join().unwrap();
        backward.join().unwrap();

        // Symmetric flows cancel out exactly
        let first_balance = repository.get(first_id).unwrap().balance();
        let second_balance = repository.get(second_id).unwrap().balance();
        assert_eq!(first_balance, Money::new(10_000, Currency::Eur));
        assert_eq!(second_balance, Money::new(10_000, Currency::Eur));
    }
}
