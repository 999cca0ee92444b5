//! Store directory records that reviews point at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A store listed in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A menu item offered by exactly one store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Menu {
    pub id: String,
    pub store_id: String,
    pub name: String,
    pub price: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Metadata for an uploaded media object owned by one store.
///
/// The object itself lives in external storage under `object_key`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredFile {
    pub id: String,
    pub store_id: String,
    pub object_key: String,
    pub content_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a store.
#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub address: Option<String>,
}

/// Request payload for adding a menu item to a store.
#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub name: String,
    pub price: Option<u32>,
}

/// Request payload for registering an uploaded file with a store.
#[derive(Debug, Deserialize)]
pub struct RegisterFileRequest {
    pub object_key: String,
    pub content_type: Option<String>,
}

impl Store {
    /// Create a new store with a fresh id.
    pub fn new(name: String, address: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            address,
            created_at: Utc::now(),
        }
    }
}

impl Menu {
    /// Create a new menu item owned by `store_id`.
    pub fn new(store_id: String, name: String, price: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            name,
            price,
            created_at: Utc::now(),
        }
    }
}

impl StoredFile {
    /// Create file metadata owned by `store_id`.
    pub fn new(store_id: String, object_key: String, content_type: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store_id,
            object_key,
            content_type,
            created_at: Utc::now(),
        }
    }
}
