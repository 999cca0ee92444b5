//! Store directory HTTP handlers, including menus and uploaded files.

use super::normalize::{normalize_optional, require_text};
use crate::{error::HttpError, models::store::*, AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use storereview_core::error::OptionalRowExt;

fn ensure_store(state: &AppState, store_id: &str) -> Result<Store, AppError> {
    state.db.stores.get(store_id).or_not_found(AppError::StoreNotFound)
}

/// Create a new store.
///
/// # Errors
/// Returns 400 for an empty name, or a storage error.
pub async fn create_store(
    State(state): State<AppState>,
    Json(req): Json<CreateStoreRequest>,
) -> Result<Json<Store>, HttpError> {
    let name = require_text(req.name, "name")?;
    let store = Store::new(name, normalize_optional(req.address));
    state.db.stores.create(&store)?;
    Ok(Json(store))
}

/// List all stores ordered by name.
///
/// # Errors
/// Returns an error if listing fails.
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<Vec<Store>>, HttpError> {
    Ok(Json(state.db.stores.list()?))
}

/// Fetch one store.
///
/// # Errors
/// Returns 404 when the store does not exist.
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Store>, HttpError> {
    Ok(Json(ensure_store(&state, &id)?))
}

/// Add a menu item to a store.
///
/// # Errors
/// Returns 400 for an empty name, 404 when the store does not exist.
pub async fn create_menu(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(req): Json<CreateMenuRequest>,
) -> Result<Json<Menu>, HttpError> {
    let name = require_text(req.name, "name")?;
    let menu = Menu::new(store_id, name, req.price);
    state.db.menus.create(&menu)?;
    Ok(Json(menu))
}

/// List a store's menu items.
///
/// # Errors
/// Returns 404 when the store does not exist.
pub async fn list_menus(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<Menu>>, HttpError> {
    ensure_store(&state, &store_id)?;
    Ok(Json(state.db.menus.list_by_store(&store_id)?))
}

/// Register metadata for an already-uploaded object.
///
/// # Errors
/// Returns 400 for an empty object key, 404 when the store does not exist.
pub async fn register_file(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(req): Json<RegisterFileRequest>,
) -> Result<Json<StoredFile>, HttpError> {
    let object_key = require_text(req.object_key, "object_key")?;
    let file = StoredFile::new(store_id, object_key, normalize_optional(req.content_type));
    state.db.files.create(&file)?;
    Ok(Json(file))
}

/// List a store's registered files.
///
/// # Errors
/// Returns 404 when the store does not exist.
pub async fn list_files(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<StoredFile>>, HttpError> {
    ensure_store(&state, &store_id)?;
    Ok(Json(state.db.files.list_by_store(&store_id)?))
}
