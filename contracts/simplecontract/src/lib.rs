//! Keyed message store
//!
//! Every account may keep one message in the contract's `messages` table:
//!
//! - `sendmsg(from, message)` creates or replaces the message of `from`,
//!   and needs `from`'s authority
//! - `clear()` erases every message, and needs the contract account's
//!   authority
//!
//! The table lives in the contract's own scope, so all callers share it.

#![warn(missing_docs)]

pub mod actions;
pub mod contract;

use msgbox_sdk::{Name, TableRow};
use serde::{Deserialize, Serialize};

pub use actions::{Clear, SendMsg};
pub use contract::SimpleContract;

/// Table holding one [`Message`] per account
pub const MESSAGES: Name = Name::constant("messages");

/// Create or replace the caller's message
pub const SENDMSG: Name = Name::constant("sendmsg");

/// Erase all messages
pub const CLEAR: Name = Name::constant("clear");

/// Row of the `messages` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Account that wrote the message; the primary key
    pub user: Name,
    /// Latest text sent by `user`
    pub text: String,
}

impl TableRow for Message {
    fn primary_key(&self) -> u64 {
        self.user.as_u64()
    }
}
