//! Msgbox core types
//!
//! Shared vocabulary between the host runtime and contracts:
//!
//! - [`Name`]: the 64-bit packed account/action/table identifier
//! - [`Action`] and [`PermissionLevel`]: what a caller submits to the chain
//! - [`codec`]: the binary calling convention used for action arguments
//!
//! ```rust
//! use msgbox_types::{Action, Name, PermissionLevel};
//!
//! let contract: Name = "me.wam".parse().unwrap();
//! let action = Action::new(
//!     contract,
//!     Name::constant("clear"),
//!     vec![PermissionLevel::active(contract)],
//!     &(),
//! );
//! assert!(action.data.is_empty());
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod codec;
pub mod error;
pub mod name;

// Re-export main types
pub use action::{Action, PermissionLevel};
pub use codec::{Pack, Unpack, VarUint32, unpack_from_slice};
pub use error::{CodecError, NameError};
pub use name::Name;
