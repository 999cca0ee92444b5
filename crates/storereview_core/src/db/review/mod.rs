//! Review storage operations backed by redb.
//!
//! A review row is always written together with its recency index rows and
//! its menu/file links inside one caller-supplied write transaction.

mod helpers;
mod likes;

use crate::db::tables::*;
use crate::db::time_util::{reverse_timestamp_key, timestamp_millis};
use crate::db::transactions::{fail_if_armed, TransactionFailpoint};
use crate::{error::AppError, models::review::*};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

use self::helpers::{sort_views, ReviewTables};

/// Accessor for review rows, their indexes, links, and likes.
pub struct ReviewDb {
    db: Arc<redb::Database>,
}

impl ReviewDb {
    /// Initialize review tables if they do not exist yet.
    ///
    /// # Returns
    /// A new [`ReviewDb`] accessor bound to `db`.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(REVIEWS)?;
        write_txn.open_table(REVIEWS_BY_STORE)?;
        write_txn.open_table(REVIEWS_BY_USER)?;
        write_txn.open_table(REVIEW_MENUS)?;
        write_txn.open_table(REVIEW_FILES)?;
        write_txn.open_table(REVIEW_LIKES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a review row, its index rows, and its links into an open write
    /// transaction.
    ///
    /// Nothing is committed here; the caller commits or aborts `txn` as a unit.
    /// Link ids must already be validated against the review's store.
    ///
    /// # Arguments
    /// - `txn`: Open write transaction owned by the caller.
    /// - `review`: Review row to insert.
    /// - `menu_ids`: Validated, deduplicated menu ids to link.
    /// - `file_ids`: Validated, deduplicated file ids to link.
    ///
    /// # Errors
    /// Returns [`AppError::AlreadyExists`] on id collision, or a storage /
    /// serialization error. Any error leaves `txn` in a state the caller must
    /// abort.
    pub fn insert_in_txn(
        &self,
        txn: &redb::WriteTransaction,
        review: &Review,
        menu_ids: &[String],
        file_ids: &[String],
    ) -> Result<(), AppError> {
        let encoded = bincode::serialize(review)?;
        let created_millis = timestamp_millis(review.created_at);
        let recency_key = reverse_timestamp_key(review.created_at);
        let review_id = review.id.as_str();

        let mut reviews = txn.open_table(REVIEWS)?;
        let mut by_store = txn.open_table(REVIEWS_BY_STORE)?;
        let mut by_user = txn.open_table(REVIEWS_BY_USER)?;
        let mut menu_links = txn.open_table(REVIEW_MENUS)?;
        let mut file_links = txn.open_table(REVIEW_FILES)?;

        if reviews.get(review_id)?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Review id '{}' already exists",
                review_id
            )));
        }

        reviews.insert(review_id, encoded.as_slice())?;
        by_store.insert((review.store_id.as_str(), recency_key, review_id), ())?;
        by_user.insert((review.user_id.as_str(), recency_key, review_id), ())?;
        fail_if_armed(TransactionFailpoint::ReviewAfterRowInsertOnce)?;

        for menu_id in menu_ids {
            menu_links.insert((review_id, menu_id.as_str()), created_millis)?;
        }
        fail_if_armed(TransactionFailpoint::ReviewAfterMenuLinksOnce)?;

        for file_id in file_ids {
            file_links.insert((review_id, file_id.as_str()), created_millis)?;
        }
        Ok(())
    }

    /// Fetch a canonical review row by id.
    ///
    /// # Returns
    /// `Ok(Some(review))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<Review>, AppError> {
        let read_txn = self.db.begin_read()?;
        ReviewTables::open(&read_txn)?.load(id)
    }

    /// Fetch a review with links and ledger-derived fields.
    ///
    /// # Arguments
    /// - `id`: Review id.
    /// - `viewer`: Optional user whose like state is reported.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get_view(&self, id: &str, viewer: Option<&str>) -> Result<Option<ReviewView>, AppError> {
        let read_txn = self.db.begin_read()?;
        let tables = ReviewTables::open(&read_txn)?;
        match tables.load(id)? {
            Some(review) => Ok(Some(tables.view(review, viewer)?)),
            None => Ok(None),
        }
    }

    /// List a store's reviews in the requested order.
    ///
    /// Like counts are computed from the ledger inside the same read snapshot
    /// as the rows they describe.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list_by_store(
        &self,
        store_id: &str,
        sort: ReviewSort,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError> {
        let read_txn = self.db.begin_read()?;
        let tables = ReviewTables::open(&read_txn)?;
        let mut views = tables.views_from_index(&tables.by_store, store_id, viewer)?;
        sort_views(&mut views, sort);
        Ok(views)
    }

    /// List an author's reviews, newest first.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list_by_user(
        &self,
        user_id: &str,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError> {
        let read_txn = self.db.begin_read()?;
        let tables = ReviewTables::open(&read_txn)?;
        let mut views = tables.views_from_index(&tables.by_user, user_id, viewer)?;
        sort_views(&mut views, ReviewSort::New);
        Ok(views)
    }

    /// Count review rows for a store.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count_by_store(&self, store_id: &str) -> Result<usize, AppError> {
        let read_txn = self.db.begin_read()?;
        let by_store = read_txn.open_table(REVIEWS_BY_STORE)?;
        let mut count = 0usize;
        for entry in by_store.range((store_id, 0u64, "")..)? {
            let (key, _) = entry?;
            if key.value().0 != store_id {
                break;
            }
            count += 1;
        }
        Ok(count)
    }

    /// Count link rows (menu plus file) stored for a review id.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count_links(&self, review_id: &str) -> Result<usize, AppError> {
        let read_txn = self.db.begin_read()?;
        let menus = read_txn.open_table(REVIEW_MENUS)?;
        let files = read_txn.open_table(REVIEW_FILES)?;
        let mut count = 0usize;
        for table in [&menus, &files] {
            for entry in table.range((review_id, "")..)? {
                let (key, _) = entry?;
                if key.value().0 != review_id {
                    break;
                }
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests;
