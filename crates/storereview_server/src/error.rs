//! HTTP error mapping for API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use storereview_core::{AppError, ErrorKind};

/// Handler error that renders an [`AppError`] as a JSON response.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let message = match kind {
            ErrorKind::Internal => {
                tracing::error!("Internal error: {:?}", self.0);
                "Internal server error".to_string()
            }
            _ => self.0.to_string(),
        };

        let body = Json(json!({ "error": message, "kind": kind.as_str() }));
        (status_for(kind), body).into_response()
    }
}
