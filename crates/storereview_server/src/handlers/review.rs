//! Review HTTP handlers.

use crate::{
    auth::{AuthUser, MaybeUser},
    error::HttpError,
    models::review::*,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};

/// Author a review for a store.
///
/// # Errors
/// Returns 401 without an identity, 404 for an unknown store, 400 for a bad
/// rating or link ids.
pub async fn create_review(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(store_id): Path<String>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<Json<ReviewView>, HttpError> {
    let created = state.reviews.create_review(&store_id, &user_id, req)?;
    Ok(Json(created))
}

/// List a store's reviews, `?sort=liked` for most liked first.
///
/// # Errors
/// Returns 404 for an unknown store.
pub async fn list_reviews(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(store_id): Path<String>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<Vec<ReviewView>>, HttpError> {
    let sort = ReviewSort::from_query(query.sort.as_deref());
    let reviews = state
        .reviews
        .list_reviews(&store_id, sort, viewer.as_deref())?;
    Ok(Json(reviews))
}

/// Fetch one review under its store.
///
/// # Errors
/// Returns 404 when the review is missing or belongs to another store.
pub async fn get_review(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path((store_id, review_id)): Path<(String, String)>,
) -> Result<Json<ReviewView>, HttpError> {
    let review = state
        .reviews
        .get_review(&store_id, &review_id, viewer.as_deref())?;
    Ok(Json(review))
}

/// Like a review as the calling user.
///
/// # Errors
/// Returns 401 without an identity, 404 for an unknown review.
pub async fn like_review(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(review_id): Path<String>,
) -> Result<Json<LikeSummary>, HttpError> {
    Ok(Json(state.reviews.like_review(&review_id, &user_id)?))
}

/// Remove the calling user's like.
///
/// # Errors
/// Returns 401 without an identity, 404 for an unknown review.
pub async fn unlike_review(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(review_id): Path<String>,
) -> Result<Json<LikeSummary>, HttpError> {
    Ok(Json(state.reviews.unlike_review(&review_id, &user_id)?))
}

/// List reviews written by a user, newest first.
///
/// # Errors
/// Returns an error if listing fails.
pub async fn list_user_reviews(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ReviewView>>, HttpError> {
    let reviews = state
        .reviews
        .list_user_reviews(&user_id, viewer.as_deref())?;
    Ok(Json(reviews))
}
