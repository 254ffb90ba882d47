//! Core business logic module
//!
//! This module contains the ledger's core components:
//! - `account` - The account aggregate and its business rules
//! - `traits` - The repository abstraction the service is built against
//! - `memory` - HashMap-backed repository for single-threaded use
//! - `shared` - Thread-safe repository with per-account locking
//! - `service` - Use-case orchestration (create, deposit, transfer)

pub mod account;
pub mod memory;
pub mod service;
pub mod shared;
pub mod traits;

pub use account::Account;
pub use memory::InMemoryAccountRepository;
pub use service::AccountService;
pub use shared::SharedAccountRepository;
pub use traits::AccountRepository;
