//! Database layer and transactional helpers backed by redb.

/// Offline backup helpers.
pub mod backup;
/// Uploaded-file metadata storage.
pub mod file;
/// Menu storage.
pub mod menu;
/// Generic storage for store-owned rows.
pub mod owned;
/// Review, link, and like ledger storage.
pub mod review;
/// Store storage.
pub mod store;
/// Table definitions.
pub mod tables;
mod time_util;
/// Transaction runner and test failpoints.
pub mod transactions;

use crate::error::AppError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Database handle with per-entity accessors over one redb file.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub stores: store::StoreDb,
    pub menus: menu::MenuDb,
    pub files: file::FileDb,
    pub reviews: review::ReviewDb,
}

/// Resolve the redb file path inside a configured DB directory.
///
/// # Returns
/// `<db_path>/data.redb`.
pub fn database_file_path(db_path: &str) -> PathBuf {
    Path::new(db_path).join(tables::REDB_FILE_NAME)
}

impl Database {
    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Returns
    /// A new [`Database`] wrapper that shares the underlying file.
    ///
    /// # Errors
    /// Returns an error if the required tables cannot be created.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            stores: store::StoreDb::new(db.clone())?,
            menus: menu::MenuDb::new(db.clone())?,
            files: file::FileDb::new(db.clone())?,
            reviews: review::ReviewDb::new(db.clone())?,
            db,
        })
    }

    /// Open (or create) the database directory and initialize tables.
    ///
    /// # Arguments
    /// - `path`: Directory that holds `data.redb`.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the file is held by
    /// another process, or table initialization fails.
    pub fn new(path: &str) -> Result<Self, AppError> {
        std::fs::create_dir_all(path).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                path, err
            ))
        })?;

        let file_path = database_file_path(path);
        let db = match redb::Database::create(&file_path) {
            Ok(db) => Arc::new(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database at '{}' is already open in another process.\n\
                    Stop the other storereview instance, or set DB_PATH to a different location.",
                    file_path.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::debug!("Opened review database at {}", file_path.display());
        Self::from_shared(db)
    }
}
