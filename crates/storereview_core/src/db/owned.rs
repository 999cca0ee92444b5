//! Storage for rows owned by exactly one store (menus, uploaded files).
//!
//! Each row kind has a canonical table keyed by id and an ownership index
//! keyed by `(store_id, id)`. Both are written in the same transaction.

use super::store::ensure_store_exists_in_txn;
use crate::{db::tables::STORES, error::AppError};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;

/// A row kind stored under a single owning store.
pub trait StoreOwned: Serialize + DeserializeOwned {
    /// Canonical rows keyed by id, bincode-encoded.
    const ROWS: TableDefinition<'static, &'static str, &'static [u8]>;
    /// Ownership index keyed by `(store_id, id)`.
    const BY_STORE: TableDefinition<'static, (&'static str, &'static str), ()>;
    /// Label used in error messages and logs.
    const LABEL: &'static str;

    fn id(&self) -> &str;
    fn store_id(&self) -> &str;
}

/// Accessor for one [`StoreOwned`] row kind.
pub struct OwnedRows<T> {
    db: Arc<redb::Database>,
    _row: PhantomData<fn() -> T>,
}

impl<T: StoreOwned> OwnedRows<T> {
    /// Initialize the row and index tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(T::ROWS)?;
        write_txn.open_table(T::BY_STORE)?;
        write_txn.commit()?;
        Ok(Self {
            db,
            _row: PhantomData,
        })
    }

    /// Insert a row under its owning store.
    ///
    /// # Errors
    /// Returns [`AppError::StoreNotFound`] when the store is missing,
    /// [`AppError::AlreadyExists`] on id collision, or a storage error.
    pub fn create(&self, row: &T) -> Result<(), AppError> {
        let encoded = bincode::serialize(row)?;
        let write_txn = self.db.begin_write()?;
        {
            let stores = write_txn.open_table(STORES)?;
            let mut rows = write_txn.open_table(T::ROWS)?;
            let mut by_store = write_txn.open_table(T::BY_STORE)?;

            ensure_store_exists_in_txn(&stores, row.store_id())?;
            if rows.get(row.id())?.is_some() {
                return Err(AppError::AlreadyExists(format!(
                    "{} id '{}' already exists",
                    T::LABEL,
                    row.id()
                )));
            }
            rows.insert(row.id(), encoded.as_slice())?;
            by_store.insert((row.store_id(), row.id()), ())?;
        }
        write_txn.commit()?;
        tracing::debug!(store_id = row.store_id(), id = row.id(), "Created {}", T::LABEL);
        Ok(())
    }

    /// Fetch a row by id.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<T>, AppError> {
        let read_txn = self.db.begin_read()?;
        let rows = read_txn.open_table(T::ROWS)?;
        match rows.get(id)? {
            Some(value) => Ok(Some(bincode::deserialize(value.value())?)),
            None => Ok(None),
        }
    }

    /// List a store's rows in id order.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list_by_store(&self, store_id: &str) -> Result<Vec<T>, AppError> {
        let read_txn = self.db.begin_read()?;
        let by_store = read_txn.open_table(T::BY_STORE)?;
        let rows = read_txn.open_table(T::ROWS)?;
        let mut items = Vec::new();
        for entry in by_store.range((store_id, "")..)? {
            let (key, _) = entry?;
            let (owner, id) = key.value();
            if owner != store_id {
                break;
            }
            if let Some(value) = rows.get(id)? {
                items.push(bincode::deserialize(value.value())?);
            }
        }
        Ok(items)
    }

    /// Return the requested rows that belong to `store_id`.
    ///
    /// Missing ids and ids owned by another store are left out of the result.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn find_by_store_and_ids(&self, store_id: &str, ids: &[String]) -> Result<Vec<T>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let read_txn = self.db.begin_read()?;
        let rows = read_txn.open_table(T::ROWS)?;
        let mut matched = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(value) = rows.get(id.as_str())? else {
                continue;
            };
            let row: T = bincode::deserialize(value.value())?;
            if row.store_id() == store_id {
                matched.push(row);
            }
        }
        Ok(matched)
    }
}
