//! Action arguments

use msgbox_sdk::{CodecError, Name, Pack, Unpack};
use serde::{Deserialize, Serialize};

/// Arguments of `sendmsg`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMsg {
    /// Author of the message; must authorize the action
    pub from: Name,
    /// Message text
    pub message: String,
}

impl Pack for SendMsg {
    fn pack(&self, out: &mut Vec<u8>) {
        self.from.pack(out);
        self.message.pack(out);
    }
}

impl Unpack for SendMsg {
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            from: Name::unpack(input)?,
            message: String::unpack(input)?,
        })
    }
}

/// Arguments of `clear` (none)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clear;

impl Pack for Clear {
    fn pack(&self, _out: &mut Vec<u8>) {}
}

impl Unpack for Clear {
    fn unpack(_input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Clear)
    }
}
