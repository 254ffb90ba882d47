//! Account aggregate
//!
//! This module provides the `Account` aggregate root, which owns a balance
//! and its transaction log and enforces every business rule of the ledger:
//!
//! - Currency matching between the account, the supplied amount, and the
//!   counterparty account
//! - Sufficient-balance checks on debits, inclusive of the transfer
//!   commission
//! - A per-account limit of three successful debits per calendar day
//!
//! An account has no explicit lifecycle states; the state that matters is
//! the balance and the log. Accounts are created with a zero balance, their
//! currency is fixed at creation, and they are mutated only through
//! [`Account::credit`] and [`Account::debit`].

use crate::types::{AccountId, AccountLog, Currency, LedgerError, Money, TransactionType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of successful debits an account may perform per
/// calendar day (UTC)
const DAILY_DEBIT_LIMIT: u32 = 3;

/// Commission applied to the principal of every outgoing transfer,
/// rounded half-away-from-zero to the nearest minor unit
fn commission_for(amount: &Money) -> Result<Money, LedgerError> {
    // 0.5% of the principal
    let fee = (Decimal::from(amount.amount()) * Decimal::new(5, 3))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| LedgerError::arithmetic_overflow("commission"))?;

    Ok(Money::new(fee, amount.currency()))
}

/// Bank-style account aggregate
///
/// Owns a balance in a fixed currency and an append-only log of every
/// successful credit and debit. All invariants are enforced here; the
/// service layer only orchestrates loading and persisting.
///
/// Alongside the log, the account maintains a per-day debit counter so
/// the daily-limit check never scans the full history. The counter is
/// derived state: it is incremented exactly when a debit entry is
/// appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    currency: Currency,
    balance: Money,
    logs: Vec<AccountLog>,
    daily_debits: HashMap<NaiveDate, u32>,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// The identifier is supplied by the caller and the currency is fixed
    /// for the lifetime of the account.
    pub fn new(id: AccountId, currency: Currency) -> Self {
        Account {
            id,
            currency,
            balance: Money::zero(currency),
            logs: Vec::new(),
            daily_debits: HashMap::new(),
        }
    }

    /// The account identifier
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// The account currency, fixed at creation
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The current balance
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Every successful credit and debit, in operation order
    pub fn logs(&self) -> &[AccountLog] {
        &self.logs
    }

    /// Credit funds to the account
    ///
    /// Appends one `Credit` log entry and returns the new balance. There
    /// is no upper bound on the credited amount beyond arithmetic range.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The money's currency differs from the account currency
    /// - The new balance would overflow
    ///
    /// On failure neither the balance nor the log is touched.
    pub fn credit(&mut self, money: &Money) -> Result<Money, LedgerError> {
        self.credit_at(money, Utc::now())
    }

    /// Debit funds from this account and credit them to `destination`
    ///
    /// A commission of 0.5% of the principal (rounded half-away-from-zero)
    /// is added to the debited amount, and the destination receives
    /// principal plus commission. The preconditions are evaluated in a
    /// fixed order:
    ///
    /// 1. Currency match (amount and destination against this account)
    /// 2. Sufficient balance, inclusive of the commission
    /// 3. Daily debit limit: at most three successful debits per UTC
    ///    calendar day
    ///
    /// A currency mismatch is therefore reported even when the balance
    /// would also have been insufficient. The limit and the recorded log
    /// entry use the same authorization instant, so the check and the
    /// event agree on the day.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A currency differs from this account's currency
    /// - The balance cannot cover principal plus commission
    /// - The account already performed three debits today
    /// - An amount calculation would overflow
    ///
    /// On failure both accounts keep their balances and logs unchanged.
    pub fn debit(&mut self, destination: &mut Account, amount: &Money) -> Result<(), LedgerError> {
        self.debit_at(destination, amount, Utc::now())
    }

    fn credit_at(&mut self, money: &Money, at: DateTime<Utc>) -> Result<Money, LedgerError> {
        self.assert_currency(money.currency())?;

        let new_balance = self.balance.add(money)?;

        self.register_log(TransactionType::Credit, at);
        self.balance = new_balance;

        Ok(self.balance)
    }

    fn debit_at(
        &mut self,
        destination: &mut Account,
        amount: &Money,
        at: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let commission = commission_for(amount)?;
        let total = amount.add(&commission)?;

        self.assert_currency(amount.currency())?;
        self.assert_currency(destination.currency())?;
        self.assert_sufficient_balance(&total)?;
        self.assert_daily_debit_limit(at.date_naive())?;

        // Validate and compute everything before committing to either
        // side, so a failure leaves both accounts untouched.
        let new_balance = self.balance.reduce(&total)?;
        destination.credit_at(&total, at)?;

        self.register_log(TransactionType::Debit, at);
        self.balance = new_balance;

        Ok(())
    }

    fn assert_currency(&self, currency: Currency) -> Result<(), LedgerError> {
        if currency != self.currency {
            return Err(LedgerError::invalid_currency(self.currency, currency));
        }
        Ok(())
    }

    fn assert_sufficient_balance(&self, total: &Money) -> Result<(), LedgerError> {
        if total.amount() > self.balance.amount() {
            return Err(LedgerError::insufficient_balance(
                self.id,
                self.balance.amount(),
                total.amount(),
            ));
        }
        Ok(())
    }

    fn assert_daily_debit_limit(&self, day: NaiveDate) -> Result<(), LedgerError> {
        if self.debits_on(day) >= DAILY_DEBIT_LIMIT {
            return Err(LedgerError::daily_limit_achieved(self.id, DAILY_DEBIT_LIMIT));
        }
        Ok(())
    }

    fn debits_on(&self, day: NaiveDate) -> u32 {
        self.daily_debits.get(&day).copied().unwrap_or(0)
    }

    fn register_log(&mut self, transaction_type: TransactionType, at: DateTime<Utc>) {
        if transaction_type == TransactionType::Debit {
            *self.daily_debits.entry(at.date_naive()).or_insert(0) += 1;
        }
        self.logs
            .push(AccountLog::new(self.id, transaction_type, at));
    }
}
