//! Actions submitted to the chain

use serde::{Deserialize, Serialize};

use crate::{
    codec::{Pack, Unpack},
    error::CodecError,
    name::Name,
};

/// Permission name granted by ordinary signatures
pub const ACTIVE_PERMISSION: Name = Name::constant("active");

/// An authority an action is signed with: `actor@permission`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// Account granting the authority
    pub actor: Name,
    /// Permission of that account
    pub permission: Name,
}

impl PermissionLevel {
    /// Creates `actor@permission`
    pub fn new(actor: Name, permission: Name) -> Self {
        Self { actor, permission }
    }

    /// Creates `actor@active`
    pub fn active(actor: Name) -> Self {
        Self::new(actor, ACTIVE_PERMISSION)
    }
}

impl Pack for PermissionLevel {
    fn pack(&self, out: &mut Vec<u8>) {
        self.actor.pack(out);
        self.permission.pack(out);
    }
}

impl Unpack for PermissionLevel {
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            actor: Name::unpack(input)?,
            permission: Name::unpack(input)?,
        })
    }
}

/// A call of `name` on the contract deployed at `account`
///
/// `data` holds the packed arguments; the host checks the declared
/// `authorization` before any contract code runs, and contracts assert it
/// with `require_auth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Contract account receiving the action
    pub account: Name,
    /// Action name
    pub name: Name,
    /// Authorities the action was signed with
    pub authorization: Vec<PermissionLevel>,
    /// Packed action arguments
    pub data: Vec<u8>,
}

impl Action {
    /// Creates an action, packing `data` with the action-data codec
    pub fn new<T: Pack + ?Sized>(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data: &T,
    ) -> Self {
        Self {
            account,
            name,
            authorization,
            data: data.packed(),
        }
    }

    /// Decodes the arguments as `T`
    pub fn data_as<T: Unpack>(&self) -> Result<T, CodecError> {
        crate::codec::unpack_from_slice(&self.data)
    }
}

impl Pack for Action {
    fn pack(&self, out: &mut Vec<u8>) {
        self.account.pack(out);
        self.name.pack(out);
        self.authorization.pack(out);
        self.data.pack(out);
    }
}

impl Unpack for Action {
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            account: Name::unpack(input)?,
            name: Name::unpack(input)?,
            authorization: Vec::unpack(input)?,
            data: Vec::unpack(input)?,
        })
    }
}
