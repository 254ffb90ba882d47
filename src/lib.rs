//! Account Ledger Library
//! # Overview
//!
//! This library provides a small ledger core: bank-style accounts with
//! currency and balance invariants, and three use cases built on top of
//! them — create account, deposit funds, transfer funds between accounts.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Money, Currency, AccountLog, errors)
//! - [`core`] - Business logic components:
//!   - [`core::account`] - The account aggregate and its business rules
//!   - [`core::service`] - Use-case orchestration against a repository
//!   - [`core::memory`] / [`core::shared`] - Repository implementations
//!
//! # Business Rules
//!
//! All rules live on the account aggregate:
//!
//! - **Currency matching**: an account only interacts with money and
//!   counterparties of its own currency
//! - **Commission**: outgoing transfers carry a 0.5% fee on the
//!   principal, rounded half-away-from-zero; the balance must cover
//!   principal plus fee, and the destination receives both
//! - **Daily debit limit**: at most three successful debits per account
//!   per UTC calendar day
//!
//! Every successful credit or debit appends one immutable log entry to
//! the account that performed it.
//!
//! # Identifiers
//!
//! Account ids are opaque UUIDs supplied by the caller; the library never
//! generates them.

// Module declarations
pub mod core;
pub mod types;

pub use self::core::{
    Account, AccountRepository, AccountService, InMemoryAccountRepository,
    SharedAccountRepository,
};
pub use self::types::{AccountId, AccountLog, Currency, LedgerError, Money, TransactionType};
