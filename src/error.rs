//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! Provider failures deliberately surface the upstream error payload to the
//! caller (it is the only diagnostic the caller can act on); local file
//! errors are logged in full but reported with a generic message so that
//! filesystem paths never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::providers::ProviderError;

/// All errors that can occur in the request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request (e.g. no file field).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// One of the three upstream provider calls failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A temporary file could not be written, read, or deleted.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing: expose the message directly.
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),

            // Upstream failures: surface the provider's own payload when we
            // have one, so callers see quota / model errors verbatim.
            ServerError::Provider(e) => {
                error!(error = %e, "upstream provider error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.client_message())
            }

            // Local file errors: log the detail, keep paths private.
            ServerError::Storage(e) => {
                error!(error = %e, "temporary file error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "error handling a temporary file on the server".to_owned(),
                )
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
