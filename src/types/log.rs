//! Transaction log types
//!
//! Each successful credit or debit on an account appends one immutable
//! [`AccountLog`] entry. The log is owned exclusively by the account that
//! created it and backs the daily debit-limit check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account identifier
///
/// Opaque 128-bit id supplied by the caller; the ledger never generates
/// identifiers itself.
pub type AccountId = Uuid;

/// Direction of a balance movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Funds added to the account balance
    Credit,
    /// Funds removed from the account balance
    Debit,
}

/// Immutable record of one transaction event on an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLog {
    /// The account the event belongs to
    pub account_id: AccountId,

    /// Whether the event credited or debited the balance
    pub transaction_type: TransactionType,

    /// Instant at which the operation was authorized
    pub created_at: DateTime<Utc>,
}

impl AccountLog {
    /// Create a log entry for an authorized operation
    pub fn new(
        account_id: AccountId,
        transaction_type: TransactionType,
        created_at: DateTime<Utc>,
    ) -> Self {
        AccountLog {
            account_id,
            transaction_type,
            created_at,
        }
    }
}
