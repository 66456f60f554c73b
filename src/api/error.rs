//! HTTP error responses.
//!
//! Every failure is returned as `{"error": "..."}`. Client mistakes and stock
//! problems carry the domain message; storage failures are logged and replaced
//! with a generic message.

use crate::utils::error::{ErrorCategory, SeedError};
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    source: Option<SeedError>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500，`source` 只寫入日誌，不回傳給用戶端
    pub fn internal(message: impl Into<String>, source: SeedError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl From<SeedError> for ApiError {
    fn from(err: SeedError) -> Self {
        match err.category() {
            ErrorCategory::Request | ErrorCategory::Stock => Self::bad_request(err.to_string()),
            ErrorCategory::Concurrency => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: err.user_friendly_message(),
                source: Some(err),
            },
            ErrorCategory::Storage | ErrorCategory::Configuration => {
                Self::internal(err.user_friendly_message(), err)
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    message = %self.message,
                    error = %source,
                    "❌ Request failed"
                ),
                None => tracing::error!(
                    status = %self.status,
                    message = %self.message,
                    "❌ Request failed"
                ),
            }
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "Request rejected");
        }

        let retryable = self.source.as_ref().is_some_and(SeedError::is_retryable);
        let body = Json(ErrorResponse {
            error: self.message,
        });

        if retryable {
            (self.status, [(header::RETRY_AFTER, "1")], body).into_response()
        } else {
            (self.status, body).into_response()
        }
    }
}
