//! Msgbox Syscalls
//!
//! This crate provides the host functions Msgbox contracts call while an
//! action runs. Syscalls let contracts check authorization, print to the
//! action console, and read and write their tables.
//!
//! # Architecture
//!
//! Each syscall:
//!
//! 1. Takes `InvokeContext` as first parameter for action state access
//! 2. Validates its inputs against the runtime limits in `RuntimeConfig`
//! 3. Returns `msgbox_program_runtime::Result`, so a failed syscall aborts
//!    the action when propagated with `?`
//!
//! # Available Syscalls
//!
//! ## Logging
//! - `print` - Append a message to the action console
//! - `print_bytes` - Same, from raw UTF-8 bytes
//! - `print_name` - Print a name in text form
//!
//! ## Authorization
//! - `require_auth` - Abort unless the action carries an account's authority
//! - `has_auth` - Check for an account's authority
//! - `current_receiver` - Account of the executing contract
//!
//! ## Database
//! - `db_store` / `db_update` / `db_remove` - Write the receiver's tables
//! - `db_find` / `db_get` - Read any contract's tables
//! - `db_lowerbound` / `db_next` - Walk a table in primary key order

#![warn(missing_docs)]
#![deny(clippy::arithmetic_side_effects)]

pub mod auth;
pub mod database;
pub mod logging;

pub use auth::{current_receiver, has_auth, require_auth};
pub use database::{db_find, db_get, db_lowerbound, db_next, db_remove, db_store, db_update};
pub use logging::{print, print_bytes, print_name};
