//! Error types for the catalog API.
//!
//! [`ResourceError`] is the failure half of every handler's result. It is
//! converted into an HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation: not-found
//! outcomes become a plain-text 404, every other variant is a fault and
//! becomes a JSON 500 describing it.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Body sent with every 404 response.
pub const NOT_FOUND_BODY: &str = "That resource does not exist!";

/// Errors a resource handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The route matched but the referenced entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A path segment did not decode to valid UTF-8.
    #[error("invalid path segment: {0}")]
    InvalidSegment(String),

    /// An internal invariant did not hold.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    /// Returns `true` for the not-found outcome, `false` for faults.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Serialization(_) | Self::InvalidSegment(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            return not_found();
        }
        fault_response(&self.to_string())
    }
}

/// The plain-text 404 response.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        NOT_FOUND_BODY,
    )
        .into_response()
}

/// A JSON 500 response describing a fault.
pub fn fault_response(message: &str) -> Response {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    let body = serde_json::json!({
        "error": message,
        "status": status.as_u16(),
    });
    (status, axum::Json(body)).into_response()
}
