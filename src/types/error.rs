//! Error types for the account ledger
//!
//! This module defines all errors that can occur while executing ledger
//! use cases. Every error is terminal for the operation that raised it:
//! nothing is retried internally and the caller decides on retry policy.
//!
//! # Error Categories
//!
//! - **Domain Errors**: currency mismatch, insufficient balance, daily
//!   debit limit reached
//! - **Repository Errors**: unknown account id, duplicate account id
//! - **Arithmetic Errors**: overflow in balance or commission calculations

use crate::types::log::AccountId;
use crate::types::money::Currency;
use thiserror::Error;

/// Main error type for the account ledger
///
/// Each variant carries enough context to diagnose the failure without
/// access to the accounts involved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Two currency-tagged values disagreed
    ///
    /// Raised by money arithmetic and by account operations; always
    /// surfaced to the caller unchanged.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    InvalidCurrency {
        /// Currency of the value or account performing the operation
        expected: Currency,
        /// Currency that was supplied
        actual: Currency,
    },

    /// A debit would exceed the account balance
    ///
    /// The requested amount includes the transfer commission; the balance
    /// must cover principal and fee together.
    #[error("Insufficient balance for account {account}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Account that attempted the debit
        account: AccountId,
        /// Current balance in minor units
        balance: i64,
        /// Commission-inclusive amount requested, in minor units
        requested: i64,
    },

    /// The account already performed its allowed debits for the day
    #[error("Daily debit limit of {limit} reached for account {account}")]
    DailyTransactionLimitAchieved {
        /// Account that attempted the debit
        account: AccountId,
        /// Maximum number of successful debits per calendar day
        limit: u32,
    },

    /// No account is stored at the given id
    #[error("Account {account} not found")]
    NotFound {
        /// The unknown account id
        account: AccountId,
    },

    /// Account creation targeted an id that already exists
    #[error("Account {account} already exists")]
    CannotCreateAccount {
        /// The conflicting account id
        account: AccountId,
    },

    /// A transfer named the same account as source and destination
    #[error("Cannot transfer from account {account} to itself")]
    TransferToSelf {
        /// The account named on both sides
        account: AccountId,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to keep account state intact.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidCurrency error
    pub fn invalid_currency(expected: Currency, actual: Currency) -> Self {
        LedgerError::InvalidCurrency { expected, actual }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(account: AccountId, balance: i64, requested: i64) -> Self {
        LedgerError::InsufficientBalance {
            account,
            balance,
            requested,
        }
    }

    /// Create a DailyTransactionLimitAchieved error
    pub fn daily_limit_achieved(account: AccountId, limit: u32) -> Self {
        LedgerError::DailyTransactionLimitAchieved { account, limit }
    }

    /// Create a NotFound error
    pub fn not_found(account: AccountId) -> Self {
        LedgerError::NotFound { account }
    }

    /// Create a CannotCreateAccount error
    pub fn cannot_create_account(account: AccountId) -> Self {
        LedgerError::CannotCreateAccount { account }
    }

    /// Create a TransferToSelf error
    pub fn transfer_to_self(account: AccountId) -> Self {
        LedgerError::TransferToSelf { account }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn fixed_id() -> AccountId {
        Uuid::from_u128(0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10)
    }

    #[rstest]
    #[case::invalid_currency(
        LedgerError::invalid_currency(Currency::Pln, Currency::Eur),
        "Currency mismatch: expected PLN, got EUR"
    )]
    #[case::insufficient_balance(
        LedgerError::insufficient_balance(fixed_id(), 1000, 1302),
        "Insufficient balance for account 01020304-0506-0708-090a-0b0c0d0e0f10: balance 1000, requested 1302"
    )]
    #[case::daily_limit(
        LedgerError::daily_limit_achieved(fixed_id(), 3),
        "Daily debit limit of 3 reached for account 01020304-0506-0708-090a-0b0c0d0e0f10"
    )]
    #[case::not_found(
        LedgerError::not_found(fixed_id()),
        "Account 01020304-0506-0708-090a-0b0c0d0e0f10 not found"
    )]
    #[case::cannot_create(
        LedgerError::cannot_create_account(fixed_id()),
        "Account 01020304-0506-0708-090a-0b0c0d0e0f10 already exists"
    )]
    #[case::transfer_to_self(
        LedgerError::transfer_to_self(fixed_id()),
        "Cannot transfer from account 01020304-0506-0708-090a-0b0c0d0e0f10 to itself"
    )]
    #[case::arithmetic_overflow(
        LedgerError::arithmetic_overflow("commission"),
        "Arithmetic overflow in commission"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_currency(
        LedgerError::invalid_currency(Currency::Eur, Currency::Pln),
        LedgerError::InvalidCurrency { expected: Currency::Eur, actual: Currency::Pln }
    )]
    #[case::not_found(
        LedgerError::not_found(fixed_id()),
        LedgerError::NotFound { account: fixed_id() }
    )]
    #[case::arithmetic_overflow(
        LedgerError::arithmetic_overflow("add"),
        LedgerError::ArithmeticOverflow { operation: "add".to_string() }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }
}
