//! Storage collaborator interfaces consumed by [`crate::service::ReviewService`].
//!
//! Every lookup reports absence with a not-found [`AppError`] variant instead
//! of `Option`, so the translation happens where the absence is first seen.
//! [`Database`] implements all of them.

use crate::db::Database;
use crate::error::{AppError, OptionalRowExt};
use crate::models::review::{Review, ReviewSort, ReviewView};
use crate::models::store::{Menu, Store, StoredFile};

/// Store lookups.
pub trait StoreRepository {
    /// # Errors
    /// [`AppError::StoreNotFound`] when no store has `id`.
    fn find_store_by_id(&self, id: &str) -> Result<Store, AppError>;
}

/// Menu lookups.
pub trait MenuRepository {
    /// Return the rows whose id is in `ids` and whose owner is `store_id`.
    fn find_menus_by_store_and_ids(
        &self,
        store_id: &str,
        ids: &[String],
    ) -> Result<Vec<Menu>, AppError>;
}

/// Uploaded-file lookups.
pub trait FileRepository {
    /// Return the rows whose id is in `ids` and whose owner is `store_id`.
    fn find_files_by_store_and_ids(
        &self,
        store_id: &str,
        ids: &[String],
    ) -> Result<Vec<StoredFile>, AppError>;
}

/// Review reads, the in-transaction review write, and the like ledger.
pub trait ReviewRepository {
    /// Transaction token accepted by [`ReviewRepository::create_review_in_transaction`].
    type Tx;

    fn find_reviews_by_store(
        &self,
        store_id: &str,
        sort: ReviewSort,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError>;

    /// # Errors
    /// [`AppError::ReviewNotFound`] when no review has `id`.
    fn find_review_by_id(&self, id: &str, viewer: Option<&str>) -> Result<ReviewView, AppError>;

    /// # Errors
    /// [`AppError::ReviewNotFound`] when the review is missing or belongs to
    /// another store.
    fn find_review_in_store(
        &self,
        store_id: &str,
        review_id: &str,
        viewer: Option<&str>,
    ) -> Result<ReviewView, AppError>;

    fn find_reviews_by_user(
        &self,
        user_id: &str,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError>;

    /// Write a review and its links using a transaction started by a
    /// [`TransactionRunner`] with the same `Tx`.
    fn create_review_in_transaction(
        &self,
        tx: &Self::Tx,
        review: &Review,
        menu_ids: &[String],
        file_ids: &[String],
    ) -> Result<(), AppError>;

    /// Insert-or-ignore a like row.
    fn add_like(&self, review_id: &str, user_id: &str) -> Result<(), AppError>;

    /// Delete-if-present a like row.
    fn remove_like(&self, review_id: &str, user_id: &str) -> Result<(), AppError>;
}

/// Runs work inside one storage transaction.
pub trait TransactionRunner {
    /// Opaque token handed to in-transaction writes.
    type Tx;

    /// Commit when `work` returns `Ok`, roll back when it returns `Err`.
    ///
    /// # Errors
    /// The error returned by `work`, or a storage error from begin/commit.
    fn start_transaction<T, F>(&self, work: F) -> Result<T, AppError>
    where
        F: FnOnce(&Self::Tx) -> Result<T, AppError>;
}

impl StoreRepository for Database {
    fn find_store_by_id(&self, id: &str) -> Result<Store, AppError> {
        self.stores.get(id).or_not_found(AppError::StoreNotFound)
    }
}

impl MenuRepository for Database {
    fn find_menus_by_store_and_ids(
        &self,
        store_id: &str,
        ids: &[String],
    ) -> Result<Vec<Menu>, AppError> {
        self.menus.find_by_store_and_ids(store_id, ids)
    }
}

impl FileRepository for Database {
    fn find_files_by_store_and_ids(
        &self,
        store_id: &str,
        ids: &[String],
    ) -> Result<Vec<StoredFile>, AppError> {
        self.files.find_by_store_and_ids(store_id, ids)
    }
}

impl ReviewRepository for Database {
    type Tx = redb::WriteTransaction;

    fn find_reviews_by_store(
        &self,
        store_id: &str,
        sort: ReviewSort,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError> {
        self.reviews.list_by_store(store_id, sort, viewer)
    }

    fn find_review_by_id(&self, id: &str, viewer: Option<&str>) -> Result<ReviewView, AppError> {
        self.reviews
            .get_view(id, viewer)
            .or_not_found(AppError::ReviewNotFound)
    }

    fn find_review_in_store(
        &self,
        store_id: &str,
        review_id: &str,
        viewer: Option<&str>,
    ) -> Result<ReviewView, AppError> {
        self.reviews
            .get_view(review_id, viewer)
            .map(|found| found.filter(|view| view.review.store_id == store_id))
            .or_not_found(AppError::ReviewNotFound)
    }

    fn find_reviews_by_user(
        &self,
        user_id: &str,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError> {
        self.reviews.list_by_user(user_id, viewer)
    }

    fn create_review_in_transaction(
        &self,
        tx: &Self::Tx,
        review: &Review,
        menu_ids: &[String],
        file_ids: &[String],
    ) -> Result<(), AppError> {
        self.reviews.insert_in_txn(tx, review, menu_ids, file_ids)
    }

    fn add_like(&self, review_id: &str, user_id: &str) -> Result<(), AppError> {
        self.reviews.add_like(review_id, user_id).map(|_| ())
    }

    fn remove_like(&self, review_id: &str, user_id: &str) -> Result<(), AppError> {
        self.reviews.remove_like(review_id, user_id).map(|_| ())
    }
}
