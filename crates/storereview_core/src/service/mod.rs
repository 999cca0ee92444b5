//! Review authoring use cases over the storage collaborators.
//!
//! Validation runs as plain reads before the write transaction opens, so a
//! bad link id fails without ever taking the writer lock.

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::db::Database;
use crate::error::AppError;
use crate::models::review::{CreateReviewRequest, LikeSummary, Review, ReviewSort, ReviewView};
use crate::repository::{
    FileRepository, MenuRepository, ReviewRepository, StoreRepository, TransactionRunner,
};
use crate::validate::{dedupe_ids, normalize_optional, validate_files, validate_menus};
use std::sync::Arc;

/// Review authoring service.
///
/// `R` provides lookups and in-transaction writes; `X` opens the transaction
/// those writes run in. Both agree on the transaction token type.
pub struct ReviewService<R, X = R> {
    storage: Arc<R>,
    transactions: Option<Arc<X>>,
}

impl<R, X> Clone for ReviewService<R, X> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            transactions: self.transactions.clone(),
        }
    }
}

impl ReviewService<Database> {
    /// Service backed by one [`Database`] for both reads and transactions.
    pub fn for_database(db: Arc<Database>) -> Self {
        Self::new(db.clone(), Some(db))
    }
}

fn require_id(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

impl<R, X> ReviewService<R, X>
where
    R: StoreRepository + MenuRepository + FileRepository + ReviewRepository,
    X: TransactionRunner<Tx = R::Tx>,
{
    /// Build a service.
    ///
    /// # Arguments
    /// - `storage`: Lookup and write collaborator.
    /// - `transactions`: Transaction facility. `None` makes every
    ///   [`ReviewService::create_review`] call fail with
    ///   [`AppError::InvalidTransaction`].
    pub fn new(storage: Arc<R>, transactions: Option<Arc<X>>) -> Self {
        Self {
            storage,
            transactions,
        }
    }

    /// Author a review for a store, linking menus and uploaded files.
    ///
    /// # Arguments
    /// - `store_id`: Reviewed store.
    /// - `user_id`: Author identity.
    /// - `request`: Rating, optional content and sub-ratings, and link ids.
    ///
    /// # Returns
    /// The stored review with its links, no likes yet.
    ///
    /// # Errors
    /// - [`AppError::InvalidInput`] for empty ids or unknown/foreign menu ids.
    /// - [`AppError::StoreNotFound`] when the store does not exist.
    /// - [`AppError::InvalidRating`] when the rating is outside 1..=5.
    /// - [`AppError::InvalidFileIds`] for unknown/foreign file ids.
    /// - [`AppError::InvalidTransaction`] when no transaction facility exists.
    /// - Storage errors from the write; nothing is persisted in that case.
    pub fn create_review(
        &self,
        store_id: &str,
        user_id: &str,
        request: CreateReviewRequest,
    ) -> Result<ReviewView, AppError> {
        require_id(store_id, "store_id")?;
        require_id(user_id, "user_id")?;

        self.storage.find_store_by_id(store_id)?;

        if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            return Err(AppError::InvalidRating);
        }
        let rating = u8::try_from(request.rating).map_err(|_| AppError::InvalidRating)?;

        let menu_ids = dedupe_ids(&request.menu_ids);
        let menus = validate_menus(self.storage.as_ref(), store_id, &menu_ids)?;
        if menus.len() != menu_ids.len() {
            tracing::warn!(
                store_id,
                requested = menu_ids.len(),
                matched = menus.len(),
                "Rejected review with menus outside the store"
            );
            return Err(AppError::InvalidInput(
                "One or more menu ids do not belong to this store".to_string(),
            ));
        }

        let file_ids = dedupe_ids(&request.file_ids);
        let files = validate_files(self.storage.as_ref(), store_id, &file_ids)?;
        if files.len() != file_ids.len() {
            tracing::warn!(
                store_id,
                requested = file_ids.len(),
                matched = files.len(),
                "Rejected review with files outside the store"
            );
            return Err(AppError::InvalidFileIds);
        }

        let Some(transactions) = self.transactions.as_ref() else {
            tracing::error!("Review write requested without a transaction facility");
            return Err(AppError::InvalidTransaction);
        };

        let mut review = Review::new(store_id.to_string(), user_id.to_string(), rating);
        review.content = normalize_optional(request.content);
        review.rating_details = request.rating_details;

        transactions.start_transaction(|tx| {
            self.storage
                .create_review_in_transaction(tx, &review, &menu_ids, &file_ids)
        })?;
        tracing::info!(
            review_id = %review.id,
            store_id,
            menus = menu_ids.len(),
            files = file_ids.len(),
            "Created review"
        );

        // Stored links come back in key order; report them the same way.
        let mut menu_ids = menu_ids;
        let mut file_ids = file_ids;
        menu_ids.sort();
        file_ids.sort();
        Ok(ReviewView {
            review,
            menu_ids,
            file_ids,
            likes_count: 0,
            liked_by_me: false,
        })
    }

    /// List a store's reviews in the requested order.
    ///
    /// # Errors
    /// [`AppError::StoreNotFound`] when the store does not exist, or a storage
    /// error.
    pub fn list_reviews(
        &self,
        store_id: &str,
        sort: ReviewSort,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError> {
        require_id(store_id, "store_id")?;
        self.storage.find_store_by_id(store_id)?;
        self.storage.find_reviews_by_store(store_id, sort, viewer)
    }

    /// Fetch one review under a store.
    ///
    /// # Errors
    /// [`AppError::ReviewNotFound`] when the review is missing or belongs to
    /// another store.
    pub fn get_review(
        &self,
        store_id: &str,
        review_id: &str,
        viewer: Option<&str>,
    ) -> Result<ReviewView, AppError> {
        require_id(store_id, "store_id")?;
        require_id(review_id, "review_id")?;
        self.storage.find_review_in_store(store_id, review_id, viewer)
    }

    /// List reviews written by `user_id`, newest first.
    ///
    /// # Errors
    /// Returns an error for an empty id or a storage failure.
    pub fn list_user_reviews(
        &self,
        user_id: &str,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError> {
        require_id(user_id, "user_id")?;
        self.storage.find_reviews_by_user(user_id, viewer)
    }

    /// Like a review. Repeating the call is a no-op.
    ///
    /// # Errors
    /// [`AppError::InvalidInput`] for empty ids, [`AppError::ReviewNotFound`]
    /// when the review does not exist.
    pub fn like_review(&self, review_id: &str, user_id: &str) -> Result<LikeSummary, AppError> {
        require_id(review_id, "review_id")?;
        require_id(user_id, "user_id")?;
        self.storage.add_like(review_id, user_id)?;
        self.storage
            .find_review_by_id(review_id, Some(user_id))
            .map(LikeSummary::from)
    }

    /// Remove a like. Unliking without a prior like is a no-op.
    ///
    /// # Errors
    /// [`AppError::InvalidInput`] for empty ids, [`AppError::ReviewNotFound`]
    /// when the review does not exist.
    pub fn unlike_review(&self, review_id: &str, user_id: &str) -> Result<LikeSummary, AppError> {
        require_id(review_id, "review_id")?;
        require_id(user_id, "user_id")?;
        self.storage.remove_like(review_id, user_id)?;
        self.storage
            .find_review_by_id(review_id, Some(user_id))
            .map(LikeSummary::from)
    }
}
