//! Response helpers and the JSON error envelope.
//!
//! # Responsibilities
//! - Map every failure to a status code
//! - Render failures as `{"status": <int>, "message": "<string>"}`
//! - Attach `Allow` to 405 responses
//!
//! # Design Decisions
//! - Client errors are logged at debug, server errors at error
//! - Repository failures are all 500; a missing record is not special-cased

use axum::http::header::{self, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::anchor::RepositoryError;

/// Error envelope written for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request input.
    #[error("{0}")]
    BadRequest(String),

    /// Body sent with the wrong media type.
    #[error("expected '{expected}' Content-Type, got '{got}'")]
    UnsupportedMediaType { expected: &'static str, got: String },

    /// No route matched the path.
    #[error("page not found")]
    NotFound,

    /// A route matched the path but not the method.
    #[error("method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },

    /// The service layer failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Comma-joined `Allow` value for 405 responses.
    fn allow_header(&self) -> Option<String> {
        match self {
            ApiError::MethodNotAllowed { allowed } => Some(
                allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let allow = self.allow_header();
        let mut response = (
            status,
            Json(ErrorResponse {
                status: status.as_u16(),
                message,
            }),
        )
            .into_response();

        if let Some(allow) = allow.and_then(|v| HeaderValue::from_str(&v).ok()) {
            response.headers_mut().insert(header::ALLOW, allow);
        }
        response
    }
}
