//! Action scenarios replayed against a fresh in-memory chain

use std::path::Path;

use anyhow::{bail, Context};
use log::{info, warn};
use msgbox_program_runtime::{Executor, MemoryStorage, RuntimeConfig, TableId};
use msgbox_sdk::table::decode_row;
use msgbox_types::{Action, Name, PermissionLevel};
use serde::{Deserialize, Serialize};
use simplecontract::{Clear, Message, SendMsg, SimpleContract, CLEAR, MESSAGES, SENDMSG};

const DEFAULT_CONTRACT: Name = Name::constant("me.wam");
const ALICE: Name = Name::constant("alice");
const BOB: Name = Name::constant("bob");

fn default_contract() -> Name {
    DEFAULT_CONTRACT
}

/// A contract call with its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Call {
    /// `sendmsg(from, message)`
    Sendmsg(SendMsg),
    /// `clear()`
    Clear,
}

impl Call {
    fn to_action(&self, contract: Name, authorization: Vec<PermissionLevel>) -> Action {
        match self {
            Call::Sendmsg(args) => Action::new(contract, SENDMSG, authorization, args),
            Call::Clear => Action::new(contract, CLEAR, authorization, &Clear),
        }
    }
}

/// One action of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// The call to make
    #[serde(flatten)]
    pub call: Call,
    /// Accounts signing with their `active` permission
    #[serde(default)]
    pub authorization: Vec<Name>,
    /// Whether the action is expected to be rejected
    #[serde(default)]
    pub expect_failure: bool,
}

impl Step {
    fn signed(call: Call, signer: Name) -> Self {
        Self {
            call,
            authorization: vec![signer],
            expect_failure: false,
        }
    }

    fn rejected(mut self) -> Self {
        self.expect_failure = true;
        self
    }
}

/// A sequence of actions against one deployment of the message store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Account the contract is deployed at
    #[serde(default = "default_contract")]
    pub contract: Name,
    /// Runtime limits
    #[serde(default)]
    pub config: RuntimeConfig,
    /// Actions in order
    pub steps: Vec<Step>,
}

/// Result of replaying a scenario
#[derive(Debug, Default)]
pub struct Outcome {
    /// Actions applied
    pub applied: usize,
    /// Actions rejected as expected
    pub rejected: usize,
    /// Table contents after the last step
    pub messages: Vec<Message>,
}

impl Scenario {
    /// Reads a scenario from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Built-in history: two authors, an overwrite, forged calls, then a
    /// reset by the contract account
    pub fn message_history() -> Self {
        let say = |from: Name, message: &str| {
            Call::Sendmsg(SendMsg {
                from,
                message: message.to_string(),
            })
        };

        Self {
            contract: DEFAULT_CONTRACT,
            config: RuntimeConfig::default(),
            steps: vec![
                Step::signed(say(ALICE, "hi"), ALICE),
                Step::signed(say(ALICE, "bye"), ALICE),
                Step::signed(say(BOB, "yo"), BOB),
                Step::signed(say(ALICE, "forged"), BOB).rejected(),
                Step::signed(Call::Clear, ALICE).rejected(),
                Step::signed(Call::Clear, DEFAULT_CONTRACT),
                Step::signed(Call::Clear, DEFAULT_CONTRACT),
            ],
        }
    }

    /// Deploys the contract and replays every step
    ///
    /// # Errors
    /// Fails on the first step whose result differs from its expectation.
    pub fn run(&self) -> anyhow::Result<Outcome> {
        let mut executor = Executor::new(MemoryStorage::new(), self.config.clone());
        executor.deploy(self.contract, SimpleContract);

        let mut outcome = Outcome::default();
        for (index, step) in self.steps.iter().enumerate() {
            let authorization = step
                .authorization
                .iter()
                .map(|actor| PermissionLevel::active(*actor))
                .collect();
            let action = step.call.to_action(self.contract, authorization);

            match (executor.push_action(&action), step.expect_failure) {
                (Ok(receipt), false) => {
                    info!("#{} {}::{} applied", index, receipt.receiver, receipt.action);
                    if !receipt.console.is_empty() {
                        info!("#{} console: {}", index, receipt.console);
                    }
                    outcome.applied += 1;
                }
                (Err(err), true) => {
                    info!("#{} {} rejected as expected: {}", index, action.name, err);
                    outcome.rejected += 1;
                }
                (Ok(_), true) => bail!("step #{} ({}) should have been rejected", index, action.name),
                (Err(err), false) => {
                    warn!("#{} {} rejected", index, action.name);
                    return Err(err).with_context(|| format!("step #{} ({}) failed", index, action.name));
                }
            }
        }

        outcome.messages = messages(executor.storage(), self.contract)?;
        Ok(outcome)
    }
}

/// Rows of the message table of `contract`
pub fn messages(storage: &MemoryStorage, contract: Name) -> anyhow::Result<Vec<Message>> {
    let table = TableId::new(contract, contract, MESSAGES);
    storage
        .rows(&table)
        .map(|(key, bytes)| {
            decode_row(bytes).with_context(|| format!("corrupt row {} in {}", key, table))
        })
        .collect()
}
