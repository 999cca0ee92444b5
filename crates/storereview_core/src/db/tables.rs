//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Canonical store rows (`Store`, bincode-encoded).
pub const STORES: TableDefinition<&str, &[u8]> = TableDefinition::new("stores");
/// Canonical menu rows (`Menu`, bincode-encoded).
pub const MENUS: TableDefinition<&str, &[u8]> = TableDefinition::new("menus");
/// Canonical uploaded-file rows (`StoredFile`, bincode-encoded).
pub const FILES: TableDefinition<&str, &[u8]> = TableDefinition::new("files");
/// Canonical review rows (`Review`, bincode-encoded).
pub const REVIEWS: TableDefinition<&str, &[u8]> = TableDefinition::new("reviews");

/// Menu ownership index keyed by (store id, menu id).
pub const MENUS_BY_STORE: TableDefinition<(&str, &str), ()> =
    TableDefinition::new("menus_by_store");
/// File ownership index keyed by (store id, file id).
pub const FILES_BY_STORE: TableDefinition<(&str, &str), ()> =
    TableDefinition::new("files_by_store");
/// Per-store recency index keyed by (store id, reverse-millis, review id).
pub const REVIEWS_BY_STORE: TableDefinition<(&str, u64, &str), ()> =
    TableDefinition::new("reviews_by_store");
/// Per-author recency index keyed by (user id, reverse-millis, review id).
pub const REVIEWS_BY_USER: TableDefinition<(&str, u64, &str), ()> =
    TableDefinition::new("reviews_by_user");

/// Review-to-menu links keyed by (review id, menu id), valued by creation millis.
pub const REVIEW_MENUS: TableDefinition<(&str, &str), u64> = TableDefinition::new("review_menus");
/// Review-to-file links keyed by (review id, file id), valued by creation millis.
pub const REVIEW_FILES: TableDefinition<(&str, &str), u64> = TableDefinition::new("review_files");
/// Like ledger keyed by (review id, user id), valued by creation millis.
///
/// The key is the uniqueness constraint: one row per pair.
pub const REVIEW_LIKES: TableDefinition<(&str, &str), u64> = TableDefinition::new("review_likes");
