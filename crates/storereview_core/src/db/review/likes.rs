//! Like ledger: one `(review_id, user_id)` row per like.
//!
//! Adds are insert-or-ignore and removes are delete-if-present, so both are
//! safe to retry. redb serializes write transactions, which makes concurrent
//! duplicate adds converge on a single row.

use super::helpers::ReviewTables;
use super::ReviewDb;
use crate::db::tables::{REVIEWS, REVIEW_LIKES};
use crate::db::time_util::timestamp_millis;
use crate::error::AppError;
use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};

impl ReviewDb {
    /// Record that `user_id` likes `review_id`.
    ///
    /// # Returns
    /// `Ok(true)` when a new row was written, `Ok(false)` when the pair was
    /// already present.
    ///
    /// # Errors
    /// Returns [`AppError::ReviewNotFound`] when the review does not exist, or a
    /// storage error.
    pub fn add_like(&self, review_id: &str, user_id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let inserted = {
            let reviews = write_txn.open_table(REVIEWS)?;
            let mut likes = write_txn.open_table(REVIEW_LIKES)?;
            if reviews.get(review_id)?.is_none() {
                return Err(AppError::ReviewNotFound);
            }
            if likes.get((review_id, user_id))?.is_some() {
                false
            } else {
                likes.insert((review_id, user_id), timestamp_millis(Utc::now()))?;
                true
            }
        };
        write_txn.commit()?;
        if inserted {
            tracing::debug!(review_id, user_id, "Recorded like");
        }
        Ok(inserted)
    }

    /// Remove `user_id`'s like from `review_id` if one exists.
    ///
    /// # Returns
    /// `Ok(true)` when a row was removed, `Ok(false)` when there was none.
    ///
    /// # Errors
    /// Returns [`AppError::ReviewNotFound`] when the review does not exist, or a
    /// storage error.
    pub fn remove_like(&self, review_id: &str, user_id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let reviews = write_txn.open_table(REVIEWS)?;
            let mut likes = write_txn.open_table(REVIEW_LIKES)?;
            if reviews.get(review_id)?.is_none() {
                return Err(AppError::ReviewNotFound);
            }
            let removed = likes.remove((review_id, user_id))?.is_some();
            removed
        };
        write_txn.commit()?;
        if removed {
            tracing::debug!(review_id, user_id, "Removed like");
        }
        Ok(removed)
    }

    /// Live like count for a review.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count_likes(&self, review_id: &str) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        ReviewTables::open(&read_txn)?.likes_count(review_id)
    }
}
