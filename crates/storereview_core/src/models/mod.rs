//! Data models for API requests and persistence.

/// Review, link, and like data types.
pub mod review;
/// Store, menu, and uploaded-file data types.
pub mod store;

#[cfg(test)]
mod tests;
