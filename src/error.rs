//! Error taxonomy shared by shards and the gateway.
//!
//! Every variant renders as the plain-text body sent back to the client, and
//! maps onto exactly one HTTP status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors produced by namespace operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamespaceError {
    /// Missing, empty or malformed `path` parameter.
    #[error("{0}")]
    BadRequest(String),

    /// Create on a path that is already present.
    #[error("Path already exists: {0}")]
    AlreadyExists(String),

    /// Operation on an absent path.
    #[error("Path not found: {0}")]
    NotFound(String),

    /// Create (or federated write) whose parent is not present. Carries the parent path.
    #[error("Parent directory does not exist: {0}")]
    ParentMissing(String),

    /// Listing or tree rendering of a file.
    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    /// Remove of a directory that still has children on this shard.
    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(String),

    /// A shard could not be reached or timed out. Carries the shard address.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Unexpected failure, e.g. a panicked blocking task.
    #[error("Error: {0}")]
    Internal(String),
}

pub const MISSING_PATH_PARAM: &str = "Missing or invalid 'path' parameter";

impl NamespaceError {
    pub fn missing_path() -> Self {
        NamespaceError::BadRequest(MISSING_PATH_PARAM.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            NamespaceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            NamespaceError::AlreadyExists(_) => StatusCode::CONFLICT,
            NamespaceError::NotFound(_) => StatusCode::NOT_FOUND,
            NamespaceError::ParentMissing(_) => StatusCode::NOT_FOUND,
            NamespaceError::NotADirectory(_) => StatusCode::BAD_REQUEST,
            NamespaceError::DirectoryNotEmpty(_) => StatusCode::BAD_REQUEST,
            NamespaceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            NamespaceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for NamespaceError {
    fn from(err: anyhow::Error) -> Self {
        NamespaceError::Internal(err.to_string())
    }
}

impl IntoResponse for NamespaceError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Fallback for routes hit with the wrong HTTP method.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
