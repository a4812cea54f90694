//! Msgbox Program Runtime
//!
//! This crate provides the execution runtime for Msgbox contracts: it routes
//! actions to deployed contracts, gives them a per-action context, and keeps
//! each action atomic against host storage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Host chain                   │
//! │  (signature checks, block production)   │
//! └────────────────┬────────────────────────┘
//!                  │
//!                  │ push_action(Action)
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  msgbox-program-runtime (this crate)    │
//! │  ┌─────────────────────────────────┐    │
//! │  │    Executor                     │    │
//! │  │  - contract registry            │    │
//! │  │  - snapshot / rollback          │    │
//! │  └─────────────────────────────────┘    │
//! │  ┌─────────────────────────────────┐    │
//! │  │    InvokeContext                │    │
//! │  │  - receiver, authorization      │    │
//! │  │  - storage access               │    │
//! │  │  - console                      │    │
//! │  └─────────────────────────────────┘    │
//! └─────────────────────────────────────────┘
//!               │
//!               ▼
//! ┌─────────────────────────────────────────┐
//! │       msgbox-syscalls (separate)        │
//! │  - print, require_auth, db_* ...        │
//! └─────────────────────────────────────────┘
//!               │
//!               ▼
//! ┌─────────────────────────────────────────┐
//! │     StorageProvider (host-supplied)     │
//! │  - ordered rows per (code,scope,table)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use msgbox_program_runtime::{Executor, MemoryStorage, RuntimeConfig};
//!
//! let mut executor = Executor::new(MemoryStorage::new(), RuntimeConfig::default());
//! executor.deploy(contract_account, SimpleContract);
//!
//! let receipt = executor.push_action(&action)?;
//! println!("{}", receipt.console);
//! ```

#![warn(missing_docs)]
#![deny(clippy::arithmetic_side_effects)]

pub mod config;
pub mod error;
pub mod executor;
pub mod invoke_context;
pub mod storage;

// Re-export main types
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use executor::{ActionReceipt, Contract, Executor};
pub use invoke_context::InvokeContext;
pub use storage::{MemoryStorage, NoOpStorage, StorageProvider, TableId};
