//! Store storage operations backed by redb.

use crate::{db::tables::*, error::AppError, models::store::Store};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for the `stores` table.
pub struct StoreDb {
    db: Arc<redb::Database>,
}

impl StoreDb {
    /// Initialize the store table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(STORES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a new store.
    ///
    /// # Errors
    /// Returns [`AppError::AlreadyExists`] when the id is taken, or a storage /
    /// serialization error.
    pub fn create(&self, store: &Store) -> Result<(), AppError> {
        let encoded = bincode::serialize(store)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut stores = write_txn.open_table(STORES)?;
            if stores.get(store.id.as_str())?.is_some() {
                return Err(AppError::AlreadyExists(format!(
                    "Store id '{}' already exists",
                    store.id
                )));
            }
            stores.insert(store.id.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        tracing::info!(store_id = %store.id, "Created store");
        Ok(())
    }

    /// Fetch a store by id.
    ///
    /// # Returns
    /// `Ok(Some(store))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<Store>, AppError> {
        let read_txn = self.db.begin_read()?;
        let stores = read_txn.open_table(STORES)?;
        match stores.get(id)? {
            Some(value) => Ok(Some(bincode::deserialize(value.value())?)),
            None => Ok(None),
        }
    }

    /// List all stores sorted by name.
    ///
    /// # Errors
    /// Returns an error when iteration or deserialization fails.
    pub fn list(&self) -> Result<Vec<Store>, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STORES)?;
        let mut stores = Vec::new();
        for item in table.iter()? {
            let (_, value) = item?;
            let store: Store = bincode::deserialize(value.value())?;
            stores.push(store);
        }
        stores.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(stores)
    }
}

/// Verify a store row exists inside an open write transaction.
pub(crate) fn ensure_store_exists_in_txn(
    stores: &redb::Table<&str, &[u8]>,
    store_id: &str,
) -> Result<(), AppError> {
    if stores.get(store_id)?.is_none() {
        return Err(AppError::StoreNotFound);
    }
    Ok(())
}
