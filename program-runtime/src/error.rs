//! Error types for the Msgbox runtime

use msgbox_types::{CodecError, Name};
use thiserror::Error;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that abort an action
///
/// Any error returned while an action runs rejects the whole action; the
/// executor discards every write it made.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The action carries no authorization from the required account
    #[error("Missing authority of {account}")]
    MissingAuthority {
        /// The account whose authority was required
        account: Name,
    },

    /// No contract is deployed at the target account
    #[error("No contract deployed at {0}")]
    UnknownContract(Name),

    /// The contract does not dispatch the requested action
    #[error("Contract {contract} has no action {action}")]
    UnknownAction {
        /// The receiving contract
        contract: Name,
        /// The requested action name
        action: Name,
    },

    /// Malformed action data
    #[error("Invalid action data: {0}")]
    InvalidActionData(#[from] CodecError),

    /// A contract assertion failed
    #[error("Assertion failure: {0}")]
    AssertionFailed(String),

    /// Host function rejected its input
    #[error("Syscall '{syscall}' failed: {reason}")]
    SyscallError {
        /// The host function that failed
        syscall: &'static str,
        /// The reason for failure
        reason: String,
    },

    /// Row payload could not be (de)serialized
    #[error("Row serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// The storage backend failed
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl RuntimeError {
    /// Wraps a host-function failure
    pub fn syscall(syscall: &'static str, reason: impl std::fmt::Display) -> Self {
        RuntimeError::SyscallError {
            syscall,
            reason: reason.to_string(),
        }
    }

    /// Whether this is an authorization failure
    pub fn is_missing_authority(&self) -> bool {
        matches!(self, RuntimeError::MissingAuthority { .. })
    }
}
