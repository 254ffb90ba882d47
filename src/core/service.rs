//! Account service
//!
//! This module provides the `AccountService` use-case facade. It owns a
//! repository collaborator (explicit dependency injection, no global
//! state) and coordinates loading accounts, invoking aggregate
//! operations, and persisting the results.
//!
//! Each use case is one atomic unit against the repository: deposits go
//! through the single-account read-modify-write and transfers through
//! the two-account one, so a failed operation persists nothing and a
//! transfer commits both accounts together.

use crate::core::account::Account;
use crate::core::traits::AccountRepository;
use crate::types::{AccountId, Currency, LedgerError, Money};

/// Use-case facade over the account aggregate and its repository
///
/// Aggregate failures are surfaced to the caller unchanged; the service
/// never retries or recovers an operation.
pub struct AccountService<R> {
    repository: R,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a service over the given repository
    pub fn new(repository: R) -> Self {
        AccountService { repository }
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a new zero-balance account
    ///
    /// The identifier is supplied by the caller; the currency is fixed
    /// for the lifetime of the account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CannotCreateAccount`] if the repository
    /// already has an account at `account_id`.
    pub fn create_account(
        &mut self,
        account_id: AccountId,
        currency: Currency,
    ) -> Result<AccountId, LedgerError> {
        self.repository.create(Account::new(account_id, currency))?;

        tracing::debug!(account = %account_id, currency = %currency, "account created");

        Ok(account_id)
    }

    /// Deposit funds into an account and return the new balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account is stored at `account_id`
    /// - The money's currency differs from the account currency
    ///
    /// On failure nothing is persisted.
    pub fn deposit(&mut self, account_id: AccountId, money: Money) -> Result<Money, LedgerError> {
        let balance = self
            .repository
            .update(account_id, |account| account.credit(&money))?;

        tracing::debug!(
            account = %account_id,
            amount = money.amount(),
            balance = balance.amount(),
            "deposit applied"
        );

        Ok(balance)
    }

    /// Transfer funds between two accounts
    ///
    /// The source is debited the principal plus a 0.5% commission and the
    /// destination is credited the same total. Both accounts are
    /// committed together; any failure leaves both untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Source and destination are the same account
    /// - Either account does not exist
    /// - The currencies of the accounts or the amount disagree
    /// - The source balance cannot cover principal plus commission
    /// - The source already performed three debits today
    pub fn transfer(
        &mut self,
        source_id: AccountId,
        destination_id: AccountId,
        money: Money,
    ) -> Result<(), LedgerError> {
        self.repository
            .update_pair(source_id, destination_id, |source, destination| {
                source.debit(destination, &money)
            })?;

        tracing::debug!(
            source = %source_id,
            destination = %destination_id,
            amount = money.amount(),
            "transfer completed"
        );

        Ok(())
    }
}
