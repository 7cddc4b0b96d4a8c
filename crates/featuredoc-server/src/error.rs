//! Semantic error types for the service.
//!
//! [`ServerError`] covers start-up and runtime failures of the process itself.
//! [`ApiError`] covers failures of a single request and converts into an HTTP
//! response with a `{"detail": ...}` body.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use featuredoc_render::RenderError;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors that can occur while configuring or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the server attempted to listen on.
        addr: SocketAddr,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The multipart form did not contain a `file` field.
    #[error("no file was uploaded; expected a multipart field named `file`")]
    MissingFile,

    /// The uploaded file does not have a `.feature` extension.
    #[error("only .feature files are supported, got `{0}`")]
    UnsupportedFileType(String),

    /// The uploaded file exceeds the configured size limit.
    #[error("file exceeds the upload limit of {limit} bytes")]
    PayloadTooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The uploaded file is not UTF-8 text.
    #[error("file is not valid UTF-8 text")]
    InvalidEncoding,

    /// Extraction produced no scenarios.
    #[error("No scenarios found in the feature file")]
    NoScenarios,

    /// The requested document is unknown or has expired.
    #[error("document `{0}` was not found or has expired")]
    DocumentNotFound(String),

    /// The request was not a usable multipart form.
    #[error("invalid upload request: {0}")]
    MultipartRejected(#[from] MultipartRejection),

    /// The multipart body could not be read.
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    /// Rendering the document failed.
    #[error("failed to render document: {0}")]
    Render(RenderError),

    /// Serializing a JSON response failed.
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A blocking conversion task panicked or was cancelled.
    #[error("conversion task failed: {0}")]
    Task(#[from] JoinError),
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::NoScenarios => Self::NoScenarios,
            other @ RenderError::Package(_) => Self::Render(other),
        }
    }
}

impl ApiError {
    /// HTTP status reported for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile
            | Self::UnsupportedFileType(_)
            | Self::InvalidEncoding
            | Self::NoScenarios => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            Self::MultipartRejected(rejection) => rejection.status(),
            Self::Multipart(err) => err.status(),
            Self::Render(_) | Self::Serialize(_) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
