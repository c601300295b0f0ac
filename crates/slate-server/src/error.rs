//! Server error type and HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use slate_pages::ResolveError;
use slate_storage::StoreError;

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No page matches the requested path.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// No homepage candidate matches the request context.
    #[error(
        "No homepage has been configured. Please check your existing pages \
         or create a homepage in your application."
    )]
    NoHomepage,
    /// Storage failure.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl From<ResolveError> for ServerError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::PageNotFound(path) => Self::PageNotFound(path),
            ResolveError::NoHomepage => Self::NoHomepage,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PageNotFound(_) | Self::NoHomepage => StatusCode::NOT_FOUND,
            Self::Store(error) => {
                tracing::error!(%error, "Storage error while handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
