//! Database syscalls for Msgbox contracts
//!
//! This module provides syscalls for contract tables: storing, reading,
//! updating and removing rows, and walking a table in primary key order.
//!
//! Reads may target any contract's tables. Writes always go to the tables
//! of the receiving contract.

use msgbox_program_runtime::{InvokeContext, Result, RuntimeError, TableId};
use msgbox_types::Name;
use thiserror::Error as ThisError;

/// Syscall error types
#[derive(Debug, ThisError)]
pub enum SyscallError {
    /// Row payload is too large
    #[error("Row too large: {0} bytes (max {1})")]
    RowTooLarge(usize, usize),
    /// A row with this primary key already exists
    #[error("Duplicate primary key {primary_key} in {table}")]
    DuplicatePrimaryKey {
        /// Target table
        table: TableId,
        /// Offending key
        primary_key: u64,
    },
    /// No row with this primary key
    #[error("Row {primary_key} not found in {table}")]
    RowNotFound {
        /// Target table
        table: TableId,
        /// Missing key
        primary_key: u64,
    },
}

fn check_row_size(invoke_context: &InvokeContext, syscall: &'static str, len: usize) -> Result<()> {
    let max = invoke_context.config().max_row_size;
    if len > max {
        return Err(RuntimeError::syscall(syscall, SyscallError::RowTooLarge(len, max)));
    }
    Ok(())
}

fn own_table(invoke_context: &InvokeContext, scope: Name, table: Name) -> TableId {
    TableId::new(invoke_context.receiver, scope, table)
}

/// Store a new row in a table of the receiving contract
///
/// # Arguments
/// * `scope` - Table scope
/// * `table` - Table name
/// * `primary_key` - Key of the new row
/// * `value` - Row payload
///
/// # Errors
/// - `RowTooLarge` - If the payload exceeds the configured row limit
/// - `DuplicatePrimaryKey` - If a row with `primary_key` already exists
pub fn db_store(
    invoke_context: &mut InvokeContext,
    scope: Name,
    table: Name,
    primary_key: u64,
    value: &[u8],
) -> Result<()> {
    check_row_size(invoke_context, "db_store", value.len())?;

    let id = own_table(invoke_context, scope, table);
    if invoke_context.storage().get(&id, primary_key)?.is_some() {
        return Err(RuntimeError::syscall(
            "db_store",
            SyscallError::DuplicatePrimaryKey { table: id, primary_key },
        ));
    }

    invoke_context.storage_mut().set(&id, primary_key, value)?;
    log::debug!("db_store {} key={} ({} bytes)", id, primary_key, value.len());
    Ok(())
}

/// Replace the payload of an existing row of the receiving contract
///
/// # Errors
/// - `RowTooLarge` - If the payload exceeds the configured row limit
/// - `RowNotFound` - If no row with `primary_key` exists
pub fn db_update(
    invoke_context: &mut InvokeContext,
    scope: Name,
    table: Name,
    primary_key: u64,
    value: &[u8],
) -> Result<()> {
    check_row_size(invoke_context, "db_update", value.len())?;

    let id = own_table(invoke_context, scope, table);
    if invoke_context.storage().get(&id, primary_key)?.is_none() {
        return Err(RuntimeError::syscall(
            "db_update",
            SyscallError::RowNotFound { table: id, primary_key },
        ));
    }

    invoke_context.storage_mut().set(&id, primary_key, value)?;
    log::debug!("db_update {} key={} ({} bytes)", id, primary_key, value.len());
    Ok(())
}

/// Remove a row of the receiving contract
///
/// # Errors
/// - `RowNotFound` - If no row with `primary_key` exists
pub fn db_remove(
    invoke_context: &mut InvokeContext,
    scope: Name,
    table: Name,
    primary_key: u64,
) -> Result<()> {
    let id = own_table(invoke_context, scope, table);
    if !invoke_context.storage_mut().delete(&id, primary_key)? {
        return Err(RuntimeError::syscall(
            "db_remove",
            SyscallError::RowNotFound { table: id, primary_key },
        ));
    }

    log::debug!("db_remove {} key={}", id, primary_key);
    Ok(())
}

/// Whether a row exists
///
/// # Returns
/// `Some(primary_key)` if the row exists, `None` otherwise
pub fn db_find(
    invoke_context: &InvokeContext,
    code: Name,
    scope: Name,
    table: Name,
    primary_key: u64,
) -> Result<Option<u64>> {
    let id = TableId::new(code, scope, table);
    Ok(invoke_context
        .storage()
        .get(&id, primary_key)?
        .map(|_| primary_key))
}

/// Read a row payload
///
/// # Errors
/// - `RowNotFound` - If no row with `primary_key` exists
pub fn db_get(
    invoke_context: &InvokeContext,
    code: Name,
    scope: Name,
    table: Name,
    primary_key: u64,
) -> Result<Vec<u8>> {
    let id = TableId::new(code, scope, table);
    invoke_context.storage().get(&id, primary_key)?.ok_or_else(|| {
        RuntimeError::syscall("db_get", SyscallError::RowNotFound { table: id, primary_key })
    })
}

/// Primary key of the first row whose key is `>= primary_key`
pub fn db_lowerbound(
    invoke_context: &InvokeContext,
    code: Name,
    scope: Name,
    table: Name,
    primary_key: u64,
) -> Result<Option<u64>> {
    let id = TableId::new(code, scope, table);
    invoke_context.storage().lower_bound(&id, primary_key)
}

/// Primary key of the row following `primary_key`
///
/// `primary_key` does not need to exist; this is a lower bound on the next
/// larger key.
pub fn db_next(
    invoke_context: &InvokeContext,
    code: Name,
    scope: Name,
    table: Name,
    primary_key: u64,
) -> Result<Option<u64>> {
    match primary_key.checked_add(1) {
        Some(next) => db_lowerbound(invoke_context, code, scope, table, next),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgbox_program_runtime::{MemoryStorage, RuntimeConfig, StorageProvider};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    const CODE: &str = "me.wam";

    fn with_context<F>(storage: &mut MemoryStorage, config: &RuntimeConfig, f: F)
    where
        F: FnOnce(&mut InvokeContext),
    {
        let mut context = InvokeContext::new(name(CODE), name("sendmsg"), &[], storage, config);
        f(&mut context);
    }

    #[test]
    fn test_store_and_get() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let (code, table) = (name(CODE), name("messages"));

        with_context(&mut storage, &config, |context| {
            assert_eq!(db_find(context, code, code, table, 1).unwrap(), None);
            db_store(context, code, table, 1, b"row").unwrap();
            assert_eq!(db_find(context, code, code, table, 1).unwrap(), Some(1));
            assert_eq!(db_get(context, code, code, table, 1).unwrap(), b"row".to_vec());
        });

        // Row landed in the receiver's namespace
        let id = TableId::new(code, code, table);
        assert_eq!(storage.get(&id, 1).unwrap(), Some(b"row".to_vec()));
    }

    #[test]
    fn test_store_duplicate() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let (code, table) = (name(CODE), name("messages"));

        with_context(&mut storage, &config, |context| {
            db_store(context, code, table, 1, b"first").unwrap();
            let err = db_store(context, code, table, 1, b"second").unwrap_err();
            assert!(matches!(err, RuntimeError::SyscallError { syscall: "db_store", .. }));
            assert_eq!(db_get(context, code, code, table, 1).unwrap(), b"first".to_vec());
        });
    }

    #[test]
    fn test_update() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let (code, table) = (name(CODE), name("messages"));

        with_context(&mut storage, &config, |context| {
            assert!(db_update(context, code, table, 1, b"nothing").is_err());
            db_store(context, code, table, 1, b"first").unwrap();
            db_update(context, code, table, 1, b"second").unwrap();
            assert_eq!(db_get(context, code, code, table, 1).unwrap(), b"second".to_vec());
        });
    }

    #[test]
    fn test_remove() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let (code, table) = (name(CODE), name("messages"));

        with_context(&mut storage, &config, |context| {
            assert!(db_remove(context, code, table, 1).is_err());
            db_store(context, code, table, 1, b"row").unwrap();
            db_remove(context, code, table, 1).unwrap();
            assert_eq!(db_find(context, code, code, table, 1).unwrap(), None);
            assert!(db_get(context, code, code, table, 1).is_err());
        });
        assert!(storage.is_empty());
    }

    #[test]
    fn test_row_too_large() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig {
            max_row_size: 8,
            ..RuntimeConfig::default()
        };
        let (code, table) = (name(CODE), name("messages"));

        with_context(&mut storage, &config, |context| {
            assert!(db_store(context, code, table, 1, &[0u8; 8]).is_ok());
            assert!(db_store(context, code, table, 2, &[0u8; 9]).is_err());
            assert!(db_update(context, code, table, 1, &[0u8; 9]).is_err());
        });
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_iteration() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let (code, table) = (name(CODE), name("messages"));

        with_context(&mut storage, &config, |context| {
            for key in [30u64, 10, 20] {
                db_store(context, code, table, key, b"row").unwrap();
            }

            let mut keys = Vec::new();
            let mut cursor = db_lowerbound(context, code, code, table, 0).unwrap();
            while let Some(key) = cursor {
                keys.push(key);
                cursor = db_next(context, code, code, table, key).unwrap();
            }
            assert_eq!(keys, vec![10, 20, 30]);

            assert_eq!(db_next(context, code, code, table, u64::MAX).unwrap(), None);
        });
    }

    #[test]
    fn test_read_other_contract() {
        let mut storage = MemoryStorage::new();
        let config = RuntimeConfig::default();
        let other = name("other");
        let table = name("messages");
        storage.set(&TableId::new(other, other, table), 5, b"theirs").unwrap();

        with_context(&mut storage, &config, |context| {
            assert_eq!(db_get(context, other, other, table, 5).unwrap(), b"theirs".to_vec());
            // Removing targets our own table, where the row does not exist
            assert!(db_remove(context, other, table, 5).is_err());
        });
    }
}
