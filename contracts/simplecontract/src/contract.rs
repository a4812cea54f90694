//! Message store actions and dispatch

use msgbox_sdk::{
    print, print_name, require_auth, unknown_action, unpack_action_data, Contract,
    InvokeContext, MultiIndex, Name, Result,
};

use crate::{Clear, Message, SendMsg, CLEAR, MESSAGES, SENDMSG};

/// The keyed message store contract
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleContract;

impl SimpleContract {
    /// The `messages` table of the contract deployed at `receiver`
    pub fn messages(receiver: Name) -> MultiIndex<Message> {
        MultiIndex::new(receiver, receiver, MESSAGES)
    }

    /// Create or replace the message of `from`
    pub fn sendmsg(&self, context: &mut InvokeContext, from: Name, message: String) -> Result<()> {
        require_auth(context, from)?;

        let messages = Self::messages(context.receiver);
        match messages.find(context, from.as_u64())? {
            None => {
                print(context, "New msg. Name: ")?;
                print_name(context, from)?;
                print(context, "; Message: ")?;
                print(context, &message)?;
                messages.emplace(
                    context,
                    &Message {
                        user: from,
                        text: message,
                    },
                )
            }
            Some(_) => {
                messages.modify(context, from.as_u64(), |row| row.text = message)?;
                Ok(())
            }
        }
    }

    /// Erase every message
    pub fn clear(&self, context: &mut InvokeContext) -> Result<()> {
        require_auth(context, context.receiver)?;

        let messages = Self::messages(context.receiver);
        let mut cursor = messages.begin(context)?;
        while let Some(key) = cursor {
            cursor = messages.erase(context, key)?;
        }
        Ok(())
    }
}

impl Contract for SimpleContract {
    fn apply(&self, context: &mut InvokeContext<'_>, action: Name, data: &[u8]) -> Result<()> {
        match action {
            SENDMSG => {
                let SendMsg { from, message } = unpack_action_data(data)?;
                self.sendmsg(context, from, message)
            }
            CLEAR => {
                let Clear = unpack_action_data(data)?;
                self.clear(context)
            }
            _ => unknown_action(context, action),
        }
    }
}
