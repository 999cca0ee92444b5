//! HTTP request handlers.

pub(crate) mod normalize;
/// Review, like, and author endpoints.
pub mod review;
/// Store directory, menu, and file endpoints.
pub mod store;
