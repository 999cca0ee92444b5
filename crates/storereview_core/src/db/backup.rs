//! Offline backup helpers for the redb database file.

use super::database_file_path;
use super::time_util::unix_timestamp_seconds;
use crate::error::AppError;
use std::path::PathBuf;
use std::time::SystemTime;

/// Copies the database file to a timestamped sibling.
pub struct BackupManager {
    db_path: PathBuf,
}

impl BackupManager {
    /// Create a backup manager for the database directory.
    pub fn new(db_path: &str) -> Self {
        Self {
            db_path: PathBuf::from(db_path),
        }
    }

    /// Copy `data.redb` to `data.redb.backup.<unix-seconds>` in the same directory.
    ///
    /// Run this while no other process has the database open; redb only
    /// guarantees a consistent file between write transactions.
    ///
    /// # Returns
    /// `Some(path)` of the new backup, or `None` when no database file exists yet.
    ///
    /// # Errors
    /// Returns an error if the clock is before the epoch or the copy fails.
    pub fn create_backup(&self) -> Result<Option<PathBuf>, AppError> {
        let source = database_file_path(&self.db_path.to_string_lossy());
        if !source.exists() {
            return Ok(None);
        }

        let timestamp = unix_timestamp_seconds(SystemTime::now())?;
        let mut file_name = source.file_name().unwrap_or_default().to_os_string();
        file_name.push(format!(".backup.{}", timestamp));
        let target = source.with_file_name(file_name);

        std::fs::copy(&source, &target).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to copy database file to {}: {}",
                target.display(),
                err
            ))
        })?;
        tracing::info!("Created database backup at {}", target.display());
        Ok(Some(target))
    }
}
