//! Shared test-only helpers for storereview_core.

use crate::models::store::{Menu, Store, StoredFile};
use crate::Database;
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
///
/// # Panics
/// Panics if temp-dir creation, path conversion, or database initialization
/// fails in the test environment.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

pub(crate) fn seed_store(db: &Database, name: &str) -> Store {
    let store = Store::new(name.to_string(), None);
    db.stores.create(&store).expect("create store");
    store
}

pub(crate) fn seed_menu(db: &Database, store: &Store, name: &str) -> Menu {
    let menu = Menu::new(store.id.clone(), name.to_string(), Some(9_000));
    db.menus.create(&menu).expect("create menu");
    menu
}

pub(crate) fn seed_file(db: &Database, store: &Store, object_key: &str) -> StoredFile {
    let file = StoredFile::new(
        store.id.clone(),
        object_key.to_string(),
        Some("image/jpeg".to_string()),
    );
    db.files.create(&file).expect("create file");
    file
}
