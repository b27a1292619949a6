//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use circulate_site::SiteError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request dispatch failed.
    #[error("{0}")]
    Site(#[from] SiteError),

    /// The blocking dispatch task panicked or was cancelled.
    #[error("Dispatch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// I/O error (binding, serving).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
