//! Caller identity taken from the `x-user-id` request header.
//!
//! Authentication happens upstream; the header value is trusted as-is.

use crate::error::HttpError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use storereview_core::{constants::USER_ID_HEADER, AppError};

fn header_user_id(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Required caller identity. Rejects with 401 when the header is missing.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

/// Optional caller identity, used to report per-viewer like state.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<String>);

impl MaybeUser {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header_user_id(parts)
            .map(AuthUser)
            .ok_or_else(|| HttpError(AppError::Unauthorized))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(header_user_id(parts)))
    }
}
