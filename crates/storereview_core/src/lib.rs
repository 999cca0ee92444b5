//! Core domain library for the store review directory (config, storage, review authoring).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across crates.
pub mod constants;
/// Database access layer and transactions.
pub mod db;
/// Process-global environment mutation helpers.
pub mod env;
/// Error taxonomy shared by storage and domain logic.
pub mod error;
/// Data models for API requests and persistence.
pub mod models;
/// Storage collaborator interfaces consumed by the authoring service.
pub mod repository;
/// Review authoring use cases.
pub mod service;
/// Input normalization and existence validators for review links.
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::{DEFAULT_PORT, MAX_RATING, MIN_RATING};
pub use db::Database;
pub use error::{AppError, ErrorKind};
pub use service::ReviewService;
