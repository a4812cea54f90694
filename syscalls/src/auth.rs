//! Authorization syscalls
//!
//! Contracts cannot see signatures; they can only ask whether the running
//! action was signed by a given account.

use msgbox_program_runtime::{InvokeContext, Result};
use msgbox_types::Name;

/// Abort the action unless it carries `account`'s authority
///
/// # Errors
/// `MissingAuthority` if no authorization of the action belongs to `account`.
pub fn require_auth(invoke_context: &InvokeContext, account: Name) -> Result<()> {
    invoke_context.require_auth(account)
}

/// Whether the action carries `account`'s authority
pub fn has_auth(invoke_context: &InvokeContext, account: Name) -> bool {
    invoke_context.has_auth(account)
}

/// Account of the contract executing the action
pub fn current_receiver(invoke_context: &InvokeContext) -> Name {
    invoke_context.receiver
}
