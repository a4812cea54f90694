//! Logging syscalls for Msgbox contracts
//!
//! This module provides the print syscalls that let contracts write to the
//! action console. Console text is returned with the action receipt and,
//! in debug mode, also forwarded to the logger.
//!
//! The console is diagnostic output: a message over the print limit is
//! truncated, never turned into an action failure.

use msgbox_program_runtime::{InvokeContext, Result, RuntimeError};
use msgbox_types::Name;
use thiserror::Error as ThisError;

/// Syscall error types
#[derive(Debug, ThisError)]
pub enum SyscallError {
    /// Invalid UTF-8 string in message
    #[error("Invalid UTF-8 string")]
    InvalidString,
}

/// Longest prefix of `message` that fits in `max` bytes without splitting a
/// character
fn truncate_to(message: &str, max: usize) -> &str {
    if message.len() <= max {
        return message;
    }
    let end = (0..=max)
        .rev()
        .find(|&index| message.is_char_boundary(index))
        .unwrap_or(0);
    &message[..end]
}

/// Print a UTF-8 message to the action console
///
/// Messages longer than `max_print_length` bytes are cut at the last
/// character boundary within the limit.
///
/// # Arguments
/// * `invoke_context` - Context of the running action
/// * `message` - Text to print
pub fn print(invoke_context: &mut InvokeContext, message: &str) -> Result<()> {
    let max = invoke_context.config().max_print_length;
    let printed = truncate_to(message, max);
    if printed.len() < message.len() {
        log::warn!(
            "[Contract {}]: print of {} bytes truncated to {} (max {})",
            invoke_context.receiver,
            message.len(),
            printed.len(),
            max
        );
    }

    invoke_context.append_console(printed);

    // Output the message if debug mode is enabled
    if invoke_context.debug_mode() {
        log::info!("[Contract {}]: {}", invoke_context.receiver, printed);
    }

    Ok(())
}

/// Print raw bytes that must be valid UTF-8
///
/// # Errors
/// - `InvalidString` - If the bytes are not valid UTF-8
pub fn print_bytes(invoke_context: &mut InvokeContext, bytes: &[u8]) -> Result<()> {
    let message = std::str::from_utf8(bytes)
        .map_err(|_| RuntimeError::syscall("print", SyscallError::InvalidString))?;
    print(invoke_context, message)
}

/// Print a name in its text form
pub fn print_name(invoke_context: &mut InvokeContext, name: Name) -> Result<()> {
    print(invoke_context, &name.to_string())
}
