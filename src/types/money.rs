//! Monetary value types for the account ledger
//!
//! This module defines the `Currency` enumeration and the `Money` value
//! object. All amounts are integer counts of minor currency units (e.g.
//! grosz, cents), never floating point.

use crate::types::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency of an account or monetary amount
///
/// Two accounts or money values interoperate only if their currency
/// matches exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Polish zloty
    Pln,
    /// Euro
    Eur,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Pln => write!(f, "PLN"),
            Currency::Eur => write!(f, "EUR"),
        }
    }
}

/// Immutable monetary value: an integer amount of minor units tagged
/// with its currency
///
/// `Money` has plain value semantics: arithmetic returns a new value and
/// never mutates either operand, and two values are equal iff both the
/// amount and the currency are equal. Every binary operation requires
/// matching currencies and fails with [`LedgerError::InvalidCurrency`]
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Create a money value from an amount of minor units and a currency
    pub fn new(amount: i64, currency: Currency) -> Self {
        Money { amount, currency }
    }

    /// The zero amount in the given currency
    pub fn zero(currency: Currency) -> Self {
        Money::new(0, currency)
    }

    /// Amount in minor units
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Currency of this value
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add another money value, returning a new value
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The currencies differ
    /// - The summed amount would overflow
    pub fn add(&self, other: &Money) -> Result<Money, LedgerError> {
        self.assert_same_currency(other)?;

        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("add"))?;

        Ok(Money::new(amount, self.currency))
    }

    /// Subtract another money value, returning a new value
    ///
    /// A negative result is permitted here; sufficiency is the caller's
    /// responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The currencies differ
    /// - The subtraction would overflow
    pub fn reduce(&self, other: &Money) -> Result<Money, LedgerError> {
        self.assert_same_currency(other)?;

        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("reduce"))?;

        Ok(Money::new(amount, self.currency))
    }

    fn assert_same_currency(&self, other: &Money) -> Result<(), LedgerError> {
        if self.currency != other.currency {
            return Err(LedgerError::invalid_currency(self.currency, other.currency));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
