//! Msgbox SDK for smart contract development
//!
//! This SDK provides the contract-side API: the [`Contract`] trait, typed
//! tables, and re-exports of the syscalls a contract needs.
//!
//! # Example
//!
//! ```rust
//! use msgbox_sdk::*;
//!
//! const HI: Name = Name::constant("hi");
//!
//! struct Hello;
//!
//! impl Contract for Hello {
//!     fn apply(&self, context: &mut InvokeContext<'_>, action: Name, data: &[u8]) -> Result<()> {
//!         match action {
//!             HI => {
//!                 let user: Name = unpack_action_data(data)?;
//!                 require_auth(context, user)?;
//!                 print(context, "Hello, ")?;
//!                 print_name(context, user)
//!             }
//!             _ => unknown_action(context, action),
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod table;

// Re-export commonly used items
pub use msgbox_program_runtime::{Contract, InvokeContext, Result, RuntimeError};
pub use msgbox_syscalls::{
    current_receiver, has_auth, print, print_bytes, print_name, require_auth,
};
pub use msgbox_types::{CodecError, Name, Pack, PermissionLevel, Unpack};
pub use table::{MultiIndex, TableRow};

/// Decode the packed arguments of an action
///
/// # Errors
/// `InvalidActionData` if `data` is not exactly one encoded `T`.
pub fn unpack_action_data<T: Unpack>(data: &[u8]) -> Result<T> {
    Ok(msgbox_types::unpack_from_slice(data)?)
}

/// Abort the action with `message` unless `condition` holds
pub fn check(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(RuntimeError::AssertionFailed(message.to_string()))
    }
}

/// Reject an action the contract does not dispatch
pub fn unknown_action(context: &InvokeContext, action: Name) -> Result<()> {
    Err(RuntimeError::UnknownAction {
        contract: context.receiver,
        action,
    })
}
