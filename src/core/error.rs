//! Typed error handling for the configuration API
//!
//! [`ApiError`] is what every request handler returns. It distinguishes the
//! cases a client reacts to differently:
//!
//! - [`ApiError::Validation`]: field-keyed messages, answered with 422 and an
//!   `errors` object so the wizard can send the user back to the right step
//! - [`ApiError::BadRequest`], [`ApiError::NotFound`],
//!   [`ApiError::Unauthorized`]: request problems with a fixed label
//! - [`ApiError::Storage`], [`ApiError::Internal`]: server faults, logged in
//!   full and answered with an opaque 500
//!
//! # Example
//!
//! ```rust,ignore
//! async fn submit(draft: &ConfigurationDraft) -> Result<StoredConfiguration, ApiError> {
//!     let configuration = parse_configuration(draft).map_err(ApiError::Validation)?;
//!     store.insert(configuration).await.map_err(ApiError::Storage)
//! }
//! ```

use crate::core::response::SubmissionRejected;
use crate::core::validation::FieldErrors;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// The main error type of the HTTP surface
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The draft failed server-side validation
    #[error("Validation errors: {0}")]
    Validation(FieldErrors),

    /// The request body could not be read as a draft
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// No route matched
    #[error("Not found")]
    NotFound,

    /// The request was explicitly refused
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The configuration store failed
    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),

    /// Anything else that should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body of every non-validation error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Public label; internal detail never leaves the server
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Unprocessable Entity",
            ApiError::BadRequest(_) => "Bad Request",
            ApiError::NotFound => "Not Found",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::Storage(_) | ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ApiError::Validation(errors) => {
                (status, Json(SubmissionRejected { errors })).into_response()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, "request failed");
                } else {
                    tracing::debug!(error = %other, status = %status, "request refused");
                }

                let body = Json(ErrorResponse {
                    error: other.public_message().to_string(),
                });
                (status, body).into_response()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Convert from anyhow::Error for store and plumbing failures
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err)
    }
}

/// A specialized Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;
