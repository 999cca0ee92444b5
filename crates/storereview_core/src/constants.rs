//! Shared constants used across storereview crates.

/// Default API port.
pub const DEFAULT_PORT: u16 = 38420;

/// Default maximum request body size accepted by the API layer.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Lowest accepted review rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted review rating.
pub const MAX_RATING: i32 = 5;

/// Query value selecting the popularity sort.
pub const SORT_MODE_LIKED: &str = "liked";
/// Query value selecting the recency sort.
pub const SORT_MODE_NEW: &str = "new";

/// Header carrying the authenticated user id, set by the upstream auth proxy.
pub const USER_ID_HEADER: &str = "x-user-id";
