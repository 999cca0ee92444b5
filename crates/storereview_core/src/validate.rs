//! Input normalization and existence validators for the menus and files a
//! review links to.
//!
//! A validator only reports which requested rows exist under the store. A
//! result shorter than the deduplicated request is a referential-integrity
//! failure the caller turns into an error for the whole operation.

use crate::error::AppError;
use crate::models::store::{Menu, StoredFile};
use crate::repository::{FileRepository, MenuRepository};
use std::collections::HashSet;

/// Trim ids, drop empty ones, and remove duplicates, keeping first-seen order.
pub fn dedupe_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Trim an optional text field; empty or whitespace-only values become `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Return the requested menus that exist and belong to `store_id`.
///
/// # Arguments
/// - `repo`: Menu lookup collaborator.
/// - `store_id`: Owning store every menu must belong to.
/// - `menu_ids`: Candidate ids; deduplicated before lookup.
///
/// # Returns
/// Matching rows. Empty input returns an empty list without a lookup.
///
/// # Errors
/// Propagates storage errors from the lookup.
pub fn validate_menus<R>(repo: &R, store_id: &str, menu_ids: &[String]) -> Result<Vec<Menu>, AppError>
where
    R: MenuRepository + ?Sized,
{
    let ids = dedupe_ids(menu_ids);
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    repo.find_menus_by_store_and_ids(store_id, &ids)
}

/// Return the requested files that exist and belong to `store_id`.
///
/// # Errors
/// Propagates storage errors from the lookup.
pub fn validate_files<R>(
    repo: &R,
    store_id: &str,
    file_ids: &[String],
) -> Result<Vec<StoredFile>, AppError>
where
    R: FileRepository + ?Sized,
{
    let ids = dedupe_ids(file_ids);
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    repo.find_files_by_store_and_ids(store_id, &ids)
}
