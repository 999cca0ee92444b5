//! Uploaded-file metadata storage backed by redb.

use super::owned::{OwnedRows, StoreOwned};
use super::tables::{FILES, FILES_BY_STORE};
use crate::models::store::StoredFile;
use redb::TableDefinition;

/// Accessor for uploaded-file rows and their store ownership index.
pub type FileDb = OwnedRows<StoredFile>;

impl StoreOwned for StoredFile {
    const ROWS: TableDefinition<'static, &'static str, &'static [u8]> = FILES;
    const BY_STORE: TableDefinition<'static, (&'static str, &'static str), ()> = FILES_BY_STORE;
    const LABEL: &'static str = "File";

    fn id(&self) -> &str {
        &self.id
    }

    fn store_id(&self) -> &str {
        &self.store_id
    }
}
