//! Review records, their read model, and the like ledger summary.

use crate::constants::{SORT_MODE_LIKED, SORT_MODE_NEW};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional per-aspect sub-ratings attached to a review.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingDetails {
    pub taste: Option<u8>,
    pub atmosphere: Option<u8>,
    pub service: Option<u8>,
    pub speed: Option<u8>,
    pub cleanliness: Option<u8>,
}

/// Canonical review row as persisted.
///
/// Like counts are never stored here; see [`ReviewView`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub store_id: String,
    pub user_id: String,
    pub rating: u8,
    pub content: Option<String>,
    pub rating_details: Option<RatingDetails>,
    pub created_at: DateTime<Utc>,
}

/// Review as returned to callers, with links and ledger-derived fields.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub menu_ids: Vec<String>,
    pub file_ids: Vec<String>,
    pub likes_count: u64,
    pub liked_by_me: bool,
}

/// Like ledger state for one review after a like/unlike call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeSummary {
    pub review_id: String,
    pub likes_count: u64,
    pub liked: bool,
}

impl From<ReviewView> for LikeSummary {
    fn from(view: ReviewView) -> Self {
        Self {
            review_id: view.review.id,
            likes_count: view.likes_count,
            liked: view.liked_by_me,
        }
    }
}

/// Request payload for authoring a review.
///
/// `rating` is kept signed so out-of-range input reaches rating validation
/// instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub rating_details: Option<RatingDetails>,
    pub content: Option<String>,
    #[serde(default)]
    pub menu_ids: Vec<String>,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

/// Query parameters for listing a store's reviews.
#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub sort: Option<String>,
}

/// Read-time ordering for review lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewSort {
    /// Most recently created first.
    #[default]
    New,
    /// Most liked first, newest first among equal counts.
    Liked,
}

impl ReviewSort {
    /// Parse a sort mode from user input.
    ///
    /// Unrecognized or missing values select [`ReviewSort::New`].
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case(SORT_MODE_LIKED) => ReviewSort::Liked,
            _ => ReviewSort::New,
        }
    }

    /// Canonical query value for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewSort::New => SORT_MODE_NEW,
            ReviewSort::Liked => SORT_MODE_LIKED,
        }
    }
}

impl Review {
    /// Create a new review row with a fresh id and the current timestamp.
    ///
    /// # Arguments
    /// - `store_id`: Reviewed store.
    /// - `user_id`: Author.
    /// - `rating`: Already-validated rating.
    ///
    /// # Returns
    /// A new [`Review`] without content or sub-ratings.
    pub fn new(store_id: String, user_id: String, rating: u8) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            user_id,
            rating,
            content: None,
            rating_details: None,
            created_at: Utc::now(),
        }
    }
}
