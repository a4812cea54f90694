//! Typed contract tables
//!
//! [`MultiIndex`] wraps the database syscalls for one table whose rows are
//! a single `serde` type, indexed by a `u64` primary key. Rows are stored as
//! `bincode` payloads.

use std::marker::PhantomData;

use msgbox_program_runtime::{InvokeContext, Result, RuntimeError, TableId};
use msgbox_syscalls::database::{
    db_find, db_get, db_lowerbound, db_next, db_remove, db_store, db_update,
};
use msgbox_types::Name;
use serde::{de::DeserializeOwned, Serialize};

use crate::check;

/// A row type stored in a [`MultiIndex`]
pub trait TableRow: Serialize + DeserializeOwned {
    /// Unique key of the row within its table
    fn primary_key(&self) -> u64;
}

/// Decode a row payload read from storage
pub fn decode_row<T: TableRow>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}

/// Encode a row payload for storage
pub fn encode_row<T: TableRow>(row: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(row)?)
}

/// Typed view of the table `table` of contract `code`, within `scope`
///
/// # Example
///
/// ```rust,ignore
/// let messages: MultiIndex<Message> = MultiIndex::new(receiver, receiver, MESSAGES);
/// match messages.find(context, from.as_u64())? {
///     None => messages.emplace(context, &Message { user: from, text })?,
///     Some(_) => messages.modify(context, from.as_u64(), |row| row.text = text)?,
/// }
/// ```
#[derive(Debug)]
pub struct MultiIndex<T> {
    code: Name,
    scope: Name,
    table: Name,
    _row: PhantomData<fn() -> T>,
}

impl<T> Clone for MultiIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MultiIndex<T> {}

impl<T: TableRow> MultiIndex<T> {
    /// Creates a view of `code`'s table `table` in `scope`
    pub fn new(code: Name, scope: Name, table: Name) -> Self {
        Self {
            code,
            scope,
            table,
            _row: PhantomData,
        }
    }

    /// Address of the underlying table
    pub fn table_id(&self) -> TableId {
        TableId::new(self.code, self.scope, self.table)
    }

    fn check_writable(&self, context: &InvokeContext) -> Result<()> {
        if self.code != context.receiver {
            return Err(RuntimeError::AssertionFailed(format!(
                "cannot modify table {} of another contract",
                self.table_id()
            )));
        }
        Ok(())
    }

    /// Row with `primary_key`, if any
    pub fn find(&self, context: &InvokeContext, primary_key: u64) -> Result<Option<T>> {
        match db_find(context, self.code, self.scope, self.table, primary_key)? {
            Some(key) => self.get(context, key).map(Some),
            None => Ok(None),
        }
    }

    /// Row with `primary_key`
    ///
    /// # Errors
    /// Fails the action if the row does not exist.
    pub fn get(&self, context: &InvokeContext, primary_key: u64) -> Result<T> {
        let bytes = db_get(context, self.code, self.scope, self.table, primary_key)?;
        decode_row(&bytes)
    }

    /// Insert a new row
    ///
    /// # Errors
    /// Fails the action if a row with the same primary key exists or the
    /// table belongs to another contract.
    pub fn emplace(&self, context: &mut InvokeContext, row: &T) -> Result<()> {
        self.check_writable(context)?;
        let bytes = encode_row(row)?;
        db_store(context, self.scope, self.table, row.primary_key(), &bytes)
    }

    /// Apply `updater` to the row with `primary_key` and store the result
    ///
    /// # Errors
    /// Fails the action if the row does not exist or `updater` changes its
    /// primary key.
    pub fn modify<F>(&self, context: &mut InvokeContext, primary_key: u64, updater: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        self.check_writable(context)?;
        let mut row = self.get(context, primary_key)?;
        updater(&mut row);
        check(
            row.primary_key() == primary_key,
            "updater cannot change primary key when modifying an object",
        )?;

        let bytes = encode_row(&row)?;
        db_update(context, self.scope, self.table, primary_key, &bytes)?;
        Ok(row)
    }

    /// Remove the row with `primary_key`
    ///
    /// # Returns
    /// Primary key of the next row, for erase-while-iterating loops
    pub fn erase(&self, context: &mut InvokeContext, primary_key: u64) -> Result<Option<u64>> {
        self.check_writable(context)?;
        db_remove(context, self.scope, self.table, primary_key)?;
        self.next(context, primary_key)
    }

    /// Primary key of the first row
    pub fn begin(&self, context: &InvokeContext) -> Result<Option<u64>> {
        self.lower_bound(context, 0)
    }

    /// Primary key of the first row whose key is `>= primary_key`
    pub fn lower_bound(&self, context: &InvokeContext, primary_key: u64) -> Result<Option<u64>> {
        db_lowerbound(context, self.code, self.scope, self.table, primary_key)
    }

    /// Primary key of the row after `primary_key`
    pub fn next(&self, context: &InvokeContext, primary_key: u64) -> Result<Option<u64>> {
        db_next(context, self.code, self.scope, self.table, primary_key)
    }

    /// Whether the table has no rows
    pub fn is_empty(&self, context: &InvokeContext) -> Result<bool> {
        Ok(self.begin(context)?.is_none())
    }

    /// All rows in primary key order
    pub fn rows(&self, context: &InvokeContext) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        let mut cursor = self.begin(context)?;
        while let Some(key) = cursor {
            rows.push(self.get(context, key)?);
            cursor = self.next(context, key)?;
        }
        Ok(rows)
    }
}
