//! Read-side helpers shared by review storage operations.

use crate::{db::tables::*, error::AppError, models::review::*};
use redb::ReadOnlyTable;
use std::cmp::Ordering;

type PairTable = ReadOnlyTable<(&'static str, &'static str), u64>;
type RecencyTable = ReadOnlyTable<(&'static str, u64, &'static str), ()>;

pub(super) fn deserialize_review(bytes: &[u8]) -> Result<Review, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Count rows of a pair-keyed table whose first key component is `owner`.
fn count_pairs(table: &PairTable, owner: &str) -> Result<u64, AppError> {
    let mut count = 0u64;
    for entry in table.range((owner, "")..)? {
        let (key, _) = entry?;
        if key.value().0 != owner {
            break;
        }
        count += 1;
    }
    Ok(count)
}

/// Collect second key components of a pair-keyed table under `owner`.
fn collect_pair_ids(table: &PairTable, owner: &str) -> Result<Vec<String>, AppError> {
    let mut ids = Vec::new();
    for entry in table.range((owner, "")..)? {
        let (key, _) = entry?;
        let (row_owner, id) = key.value();
        if row_owner != owner {
            break;
        }
        ids.push(id.to_string());
    }
    Ok(ids)
}

/// Read-only handles for every table a review view touches, opened once per
/// read transaction.
pub(super) struct ReviewTables {
    pub(super) reviews: ReadOnlyTable<&'static str, &'static [u8]>,
    pub(super) by_store: RecencyTable,
    pub(super) by_user: RecencyTable,
    menus: PairTable,
    files: PairTable,
    pub(super) likes: PairTable,
}

impl ReviewTables {
    pub(super) fn open(txn: &redb::ReadTransaction) -> Result<Self, AppError> {
        Ok(Self {
            reviews: txn.open_table(REVIEWS)?,
            by_store: txn.open_table(REVIEWS_BY_STORE)?,
            by_user: txn.open_table(REVIEWS_BY_USER)?,
            menus: txn.open_table(REVIEW_MENUS)?,
            files: txn.open_table(REVIEW_FILES)?,
            likes: txn.open_table(REVIEW_LIKES)?,
        })
    }

    pub(super) fn load(&self, review_id: &str) -> Result<Option<Review>, AppError> {
        match self.reviews.get(review_id)? {
            Some(value) => Ok(Some(deserialize_review(value.value())?)),
            None => Ok(None),
        }
    }

    pub(super) fn likes_count(&self, review_id: &str) -> Result<u64, AppError> {
        count_pairs(&self.likes, review_id)
    }

    pub(super) fn has_liked(&self, review_id: &str, user_id: &str) -> Result<bool, AppError> {
        Ok(self.likes.get((review_id, user_id))?.is_some())
    }

    /// Attach links and ledger-derived fields to a canonical row.
    pub(super) fn view(&self, review: Review, viewer: Option<&str>) -> Result<ReviewView, AppError> {
        let review_id = review.id.as_str();
        let liked_by_me = match viewer {
            Some(user_id) => self.has_liked(review_id, user_id)?,
            None => false,
        };
        let menu_ids = collect_pair_ids(&self.menus, review_id)?;
        let file_ids = collect_pair_ids(&self.files, review_id)?;
        let likes_count = self.likes_count(review_id)?;
        Ok(ReviewView {
            review,
            menu_ids,
            file_ids,
            likes_count,
            liked_by_me,
        })
    }

    /// Walk a recency index under `owner`, newest first, and build views.
    pub(super) fn views_from_index(
        &self,
        index: &RecencyTable,
        owner: &str,
        viewer: Option<&str>,
    ) -> Result<Vec<ReviewView>, AppError> {
        let mut views = Vec::new();
        for entry in index.range((owner, 0u64, "")..)? {
            let (key, _) = entry?;
            let (row_owner, _, review_id) = key.value();
            if row_owner != owner {
                break;
            }
            let Some(review) = self.load(review_id)? else {
                tracing::warn!(review_id, "Recency index points at a missing review row");
                continue;
            };
            views.push(self.view(review, viewer)?);
        }
        Ok(views)
    }
}

fn newest_first(a: &ReviewView, b: &ReviewView) -> Ordering {
    b.review
        .created_at
        .cmp(&a.review.created_at)
        .then_with(|| a.review.id.cmp(&b.review.id))
}

/// Order views for the requested sort mode.
pub(super) fn sort_views(views: &mut [ReviewView], sort: ReviewSort) {
    match sort {
        ReviewSort::New => views.sort_by(newest_first),
        ReviewSort::Liked => views.sort_by(|a, b| {
            b.likes_count
                .cmp(&a.likes_count)
                .then_with(|| newest_first(a, b))
        }),
    }
}
