//! Action executor
//!
//! Routes each action to the contract deployed at its target account and
//! runs it against the host storage. An action either completes or leaves
//! storage exactly as it found it.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use msgbox_types::{Action, Name};

use crate::{
    config::RuntimeConfig,
    error::{Result, RuntimeError},
    invoke_context::InvokeContext,
    storage::StorageProvider,
};

/// A deployed contract
///
/// `apply` is the single entry point: the contract matches `action` against
/// the actions it exposes and decodes `data` accordingly.
pub trait Contract {
    /// Runs `action` with packed arguments `data`
    fn apply(&self, context: &mut InvokeContext<'_>, action: Name, data: &[u8]) -> Result<()>;
}

/// Outcome of a successfully applied action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReceipt {
    /// Contract that executed the action
    pub receiver: Name,
    /// Action name
    pub action: Name,
    /// Text printed by the contract
    pub console: String,
}

/// Single-threaded action executor
///
/// Storage must be `Clone`: the executor snapshots it before every action
/// and restores the snapshot if the action fails.
pub struct Executor<S> {
    contracts: BTreeMap<Name, Box<dyn Contract>>,
    storage: S,
    config: RuntimeConfig,
}

impl<S: StorageProvider + Clone> Executor<S> {
    /// Creates an executor with no contracts deployed
    pub fn new(storage: S, config: RuntimeConfig) -> Self {
        Self {
            contracts: BTreeMap::new(),
            storage,
            config,
        }
    }

    /// Deploys `contract` at `account`, replacing any previous deployment
    pub fn deploy<C: Contract + 'static>(&mut self, account: Name, contract: C) {
        if self.contracts.insert(account, Box::new(contract)).is_some() {
            info!("Replaced contract at {}", account);
        } else {
            info!("Deployed contract at {}", account);
        }
    }

    /// Whether a contract is deployed at `account`
    pub fn is_deployed(&self, account: Name) -> bool {
        self.contracts.contains_key(&account)
    }

    /// Applies one action
    ///
    /// # Errors
    /// - [`RuntimeError::UnknownContract`] if nothing is deployed at
    ///   `action.account`
    /// - any error raised by the contract; storage is rolled back
    pub fn push_action(&mut self, action: &Action) -> Result<ActionReceipt> {
        let contract = self
            .contracts
            .get(&action.account)
            .ok_or(RuntimeError::UnknownContract(action.account))?;

        debug!(
            "Applying {}::{} ({} data bytes, {} authorizations)",
            action.account,
            action.name,
            action.data.len(),
            action.authorization.len()
        );

        let snapshot = self.storage.clone();
        let mut context = InvokeContext::new(
            action.account,
            action.name,
            &action.authorization,
            &mut self.storage,
            &self.config,
        );
        let result = contract.apply(&mut context, action.name, &action.data);
        let console = context.into_console();

        match result {
            Ok(()) => {
                info!("{}::{} applied", action.account, action.name);
                Ok(ActionReceipt {
                    receiver: action.account,
                    action: action.name,
                    console,
                })
            }
            Err(err) => {
                warn!("{}::{} rejected: {}", action.account, action.name, err);
                self.storage = snapshot;
                Err(err)
            }
        }
    }

    /// Host storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, TableId};
    use msgbox_types::PermissionLevel;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    /// Writes one row, then fails if the payload is empty
    struct Recorder;

    impl Contract for Recorder {
        fn apply(&self, context: &mut InvokeContext<'_>, action: Name, data: &[u8]) -> Result<()> {
            if action != name("record") {
                return Err(RuntimeError::UnknownAction {
                    contract: context.receiver,
                    action,
                });
            }
            let table = TableId::new(context.receiver, context.receiver, name("log"));
            context.storage_mut().set(&table, data.len() as u64, data)?;
            context.append_console("recorded");
            if data.is_empty() {
                return Err(RuntimeError::AssertionFailed("empty payload".into()));
            }
            context.require_auth(context.receiver)
        }
    }

    fn record(data: &[u8], signer: &str) -> Action {
        Action {
            account: name("recorder"),
            name: name("record"),
            authorization: vec![PermissionLevel::active(name(signer))],
            data: data.to_vec(),
        }
    }

    fn executor() -> Executor<MemoryStorage> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut executor = Executor::new(MemoryStorage::new(), RuntimeConfig::default());
        executor.deploy(name("recorder"), Recorder);
        executor
    }

    #[test]
    fn test_push_action_success() {
        let mut executor = executor();
        let receipt = executor.push_action(&record(b"abc", "recorder")).unwrap();

        assert_eq!(receipt.receiver, name("recorder"));
        assert_eq!(receipt.action, name("record"));
        assert_eq!(receipt.console, "recorded");
        assert_eq!(executor.storage().len(), 1);
    }

    #[test]
    fn test_unknown_contract() {
        let mut executor = executor();
        let mut action = record(b"abc", "recorder");
        action.account = name("nobody");

        let err = executor.push_action(&action).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownContract(account) if account == name("nobody")));
    }

    #[test]
    fn test_unknown_action() {
        let mut executor = executor();
        let mut action = record(b"abc", "recorder");
        action.name = name("forget");

        let err = executor.push_action(&action).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownAction { .. }));
    }

    #[test]
    fn test_failed_action_rolls_back() {
        let mut executor = executor();
        executor.push_action(&record(b"kept", "recorder")).unwrap();

        // Write happens before the assertion fails
        assert!(executor.push_action(&record(b"", "recorder")).is_err());
        // Write happens before the auth check fails
        let err = executor.push_action(&record(b"xy", "mallory")).unwrap_err();
        assert!(err.is_missing_authority());

        assert_eq!(executor.storage().len(), 1);
    }

    #[test]
    fn test_redeploy() {
        let mut executor = executor();
        assert!(executor.is_deployed(name("recorder")));
        executor.deploy(name("recorder"), Recorder);
        assert!(executor.is_deployed(name("recorder")));
        assert!(!executor.is_deployed(name("other")));
    }
}
