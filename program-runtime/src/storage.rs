//! Storage provider trait and implementations
//!
//! This module defines the storage abstraction layer that lets the runtime
//! run on top of different durable stores without modification. Rows live in
//! tables addressed by `(code, scope, table)` and are ordered by a `u64`
//! primary key; values are opaque bytes.

use std::collections::BTreeMap;

use msgbox_types::Name;

use crate::error::Result;

/// Address of a table: the owning contract, a scope within it, and the
/// table name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId {
    /// Contract that owns the table
    pub code: Name,
    /// Partition within the contract's tables
    pub scope: Name,
    /// Table name
    pub table: Name,
}

impl TableId {
    /// Creates a table address
    pub fn new(code: Name, scope: Name, table: Name) -> Self {
        Self { code, scope, table }
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.code, self.scope, self.table)
    }
}

/// Storage provider trait
///
/// This trait must be implemented by the host chain to provide storage
/// access to contracts. The runtime does not persist anything itself; it
/// only defines the interface.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use msgbox_program_runtime::storage::{StorageProvider, TableId};
///
/// struct ChainStorage {
///     // Your storage implementation
/// }
///
/// impl StorageProvider for ChainStorage {
///     fn get(&self, table: &TableId, primary_key: u64) -> Result<Option<Vec<u8>>> {
///         // Read from your storage backend
///         todo!()
///     }
///     // ...
/// }
/// ```
pub trait StorageProvider {
    /// Read a row
    ///
    /// # Returns
    /// * `Some(value)` if the row exists
    /// * `None` if it doesn't
    fn get(&self, table: &TableId, primary_key: u64) -> Result<Option<Vec<u8>>>;

    /// Insert or overwrite a row
    fn set(&mut self, table: &TableId, primary_key: u64, value: &[u8]) -> Result<()>;

    /// Delete a row
    ///
    /// # Returns
    /// * `true` if the row existed and was deleted
    /// * `false` if the row didn't exist
    fn delete(&mut self, table: &TableId, primary_key: u64) -> Result<bool>;

    /// Primary key of the first row in `table` whose key is `>= primary_key`
    fn lower_bound(&self, table: &TableId, primary_key: u64) -> Result<Option<u64>>;
}

/// In-memory storage provider
///
/// Rows are kept in a `BTreeMap` so iteration follows primary key order.
/// Cloning is how the executor takes a snapshot before running an action.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    rows: BTreeMap<(TableId, u64), Vec<u8>>,
}

impl MemoryStorage {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows across all tables
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no table holds any row
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of `table` in primary key order
    pub fn rows<'a>(&'a self, table: &'a TableId) -> impl Iterator<Item = (u64, &'a [u8])> + 'a {
        self.rows
            .range((*table, 0)..)
            .take_while(move |((id, _), _)| id == table)
            .map(|((_, key), value)| (*key, value.as_slice()))
    }
}

impl StorageProvider for MemoryStorage {
    fn get(&self, table: &TableId, primary_key: u64) -> Result<Option<Vec<u8>>> {
        Ok(self.rows.get(&(*table, primary_key)).cloned())
    }

    fn set(&mut self, table: &TableId, primary_key: u64, value: &[u8]) -> Result<()> {
        self.rows.insert((*table, primary_key), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, table: &TableId, primary_key: u64) -> Result<bool> {
        Ok(self.rows.remove(&(*table, primary_key)).is_some())
    }

    fn lower_bound(&self, table: &TableId, primary_key: u64) -> Result<Option<u64>> {
        Ok(self
            .rows
            .range((*table, primary_key)..)
            .next()
            .filter(|((id, _), _)| id == table)
            .map(|((_, key), _)| *key))
    }
}

/// No-op storage provider for testing
///
/// This implementation does nothing and is useful for:
/// - Unit tests that don't need storage
/// - Running actions whose effects are irrelevant
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStorage;

impl StorageProvider for NoOpStorage {
    fn get(&self, _table: &TableId, _primary_key: u64) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn set(&mut self, _table: &TableId, _primary_key: u64, _value: &[u8]) -> Result<()> {
        Ok(())
    }

    fn delete(&mut self, _table: &TableId, _primary_key: u64) -> Result<bool> {
        Ok(false)
    }

    fn lower_bound(&self, _table: &TableId, _primary_key: u64) -> Result<Option<u64>> {
        Ok(None)
    }
}
