//! Action invocation context
//!
//! This module provides the execution context for a single action. The
//! context holds the receiving contract, the authorities the action was
//! signed with, and access to the host's storage during contract execution.

use log::debug;
use msgbox_types::{Name, PermissionLevel};

use crate::{
    config::RuntimeConfig,
    error::{Result, RuntimeError},
    storage::StorageProvider,
};

/// Action invocation context
///
/// Built by the [`Executor`](crate::Executor) for each action and handed to
/// the contract. Everything the contract is allowed to observe or change
/// goes through it.
pub struct InvokeContext<'a> {
    // === Action ===
    /// Contract account executing the action
    pub receiver: Name,

    /// Name of the action being executed
    pub action: Name,

    /// Authorities the action was signed with
    authorization: &'a [PermissionLevel],

    // === Storage Access ===
    /// Storage provider for reading/writing contract tables
    storage: &'a mut dyn StorageProvider,

    // === Debug and Logging ===
    /// Limits and debug switch
    config: &'a RuntimeConfig,

    /// Text printed by the contract during this action
    console: String,
}

impl<'a> InvokeContext<'a> {
    /// Creates a new invocation context
    ///
    /// # Arguments
    /// * `receiver` - Contract account executing the action
    /// * `action` - Name of the action
    /// * `authorization` - Authorities the action was signed with
    /// * `storage` - Storage backend
    /// * `config` - Runtime limits
    pub fn new(
        receiver: Name,
        action: Name,
        authorization: &'a [PermissionLevel],
        storage: &'a mut dyn StorageProvider,
        config: &'a RuntimeConfig,
    ) -> Self {
        Self {
            receiver,
            action,
            authorization,
            storage,
            config,
            console: String::new(),
        }
    }

    /// Authorities the action was signed with
    pub fn authorization(&self) -> &[PermissionLevel] {
        self.authorization
    }

    /// Whether any authority of the action belongs to `account`
    pub fn has_auth(&self, account: Name) -> bool {
        self.authorization.iter().any(|level| level.actor == account)
    }

    /// Aborts the action unless it carries `account`'s authority
    ///
    /// # Errors
    /// [`RuntimeError::MissingAuthority`] if no authority of the action
    /// belongs to `account`.
    pub fn require_auth(&self, account: Name) -> Result<()> {
        if self.has_auth(account) {
            Ok(())
        } else {
            debug!(
                "{}::{} rejected: missing authority of {}",
                self.receiver, self.action, account
            );
            Err(RuntimeError::MissingAuthority { account })
        }
    }

    /// Read access to storage
    pub fn storage(&self) -> &dyn StorageProvider {
        &*self.storage
    }

    /// Write access to storage
    pub fn storage_mut(&mut self) -> &mut dyn StorageProvider {
        &mut *self.storage
    }

    /// Runtime limits for this action
    pub fn config(&self) -> &RuntimeConfig {
        self.config
    }

    /// Whether contract prints are forwarded to the logger
    pub fn debug_mode(&self) -> bool {
        self.config.debug_mode
    }

    /// Text printed so far
    pub fn console(&self) -> &str {
        &self.console
    }

    /// Appends to the action console
    pub fn append_console(&mut self, text: &str) {
        self.console.push_str(text);
    }

    /// Consumes the context, returning the printed text
    pub fn into_console(self) -> String {
        self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, TableId};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn test_invoke_context_creation() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let auth = [PermissionLevel::active(name("alice"))];
        let context = InvokeContext::new(
            name("me.wam"),
            name("sendmsg"),
            &auth,
            &mut storage,
            &config,
        );

        assert_eq!(context.receiver, name("me.wam"));
        assert_eq!(context.action, name("sendmsg"));
        assert_eq!(context.authorization(), &auth);
        assert_eq!(context.console(), "");
        assert!(!context.debug_mode());
    }

    #[test]
    fn test_require_auth() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let auth = [
            PermissionLevel::active(name("alice")),
            PermissionLevel::new(name("carol"), name("owner")),
        ];
        let context = InvokeContext::new(
            name("me.wam"),
            name("sendmsg"),
            &auth,
            &mut storage,
            &config,
        );

        assert!(context.require_auth(name("alice")).is_ok());
        // Any permission of the actor counts
        assert!(context.require_auth(name("carol")).is_ok());

        let err = context.require_auth(name("bob")).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingAuthority { account } if account == name("bob")));
    }

    #[test]
    fn test_no_authorization() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let context = InvokeContext::new(name("me.wam"), name("clear"), &[], &mut storage, &config);

        assert!(!context.has_auth(name("me.wam")));
        assert!(context.require_auth(name("me.wam")).unwrap_err().is_missing_authority());
    }

    #[test]
    fn test_storage_access() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let table = TableId::new(name("me.wam"), name("me.wam"), name("messages"));
        {
            let mut context =
                InvokeContext::new(name("me.wam"), name("sendmsg"), &[], &mut storage, &config);
            context.storage_mut().set(&table, 1, b"row").unwrap();
            assert_eq!(context.storage().get(&table, 1).unwrap(), Some(b"row".to_vec()));
        }
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_console() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let mut context =
            InvokeContext::new(name("me.wam"), name("sendmsg"), &[], &mut storage, &config);

        context.append_console("Hello, ");
        context.append_console("msgbox!");
        assert_eq!(context.into_console(), "Hello, msgbox!");
    }
}
