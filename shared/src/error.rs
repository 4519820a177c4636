//! Unified HTTP error type
//!
//! [`ApiError`] carries an [`ApiErrorCode`] that maps to an HTTP
//! status and a stable code string; `IntoResponse` renders it as the
//! unified [`ApiResponse`](crate::response::ApiResponse) envelope.

use crate::http::{Response, StatusCode};
use crate::response::ApiResponse;
use thiserror::Error;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Validation error (400)
    Validation,
    /// Resource not found (404)
    NotFound,
    /// Business rule violation (422)
    BusinessRule,
    /// Guard or gate violation (422)
    Transition,
    /// Upstream store failure (502)
    Store,
    /// Internal server error (500)
    Internal,
    /// Invalid request (400)
    Invalid,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BusinessRule => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Transition => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Invalid => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::BusinessRule => "E0005",
            Self::Transition => "E4001",
            Self::Store => "E9003",
            Self::Internal => "E9001",
            Self::Invalid => "E0006",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error
    #[error("{message}")]
    Validation { message: String },

    /// Resource not found
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Business rule violation
    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    /// Illegal or unauthorized order transition
    #[error("Transition rejected: {message}")]
    Transition { message: String },

    /// Document store failure
    #[error("Store error: {message}")]
    Store { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Invalid request
    #[error("Invalid request: {message}")]
    Invalid { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule {
            message: message.into(),
        }
    }

    pub fn transition(message: impl Into<String>) -> Self {
        Self::Transition {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            Self::Validation { .. } => ApiErrorCode::Validation,
            Self::NotFound { .. } => ApiErrorCode::NotFound,
            Self::BusinessRule { .. } => ApiErrorCode::BusinessRule,
            Self::Transition { .. } => ApiErrorCode::Transition,
            Self::Store { .. } => ApiErrorCode::Store,
            Self::Internal { .. } => ApiErrorCode::Internal,
            Self::Invalid { .. } => ApiErrorCode::Invalid,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::BusinessRule { message }
            | Self::Transition { message }
            | Self::Store { message }
            | Self::Internal { message }
            | Self::Invalid { message } => message.clone(),
            Self::NotFound { resource } => format!("{} not found", resource),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> Response<axum::body::Body> {
        let code = self.error_code();
        let status = code.status_code();

        let body = ApiResponse::<()>::error(code.code(), self.message());
        let json_body = serde_json::to_string(&body).unwrap_or_default();

        ::http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(json_body.into())
            .unwrap_or_else(|_| {
                ::http::Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body("Internal error".into())
                    .unwrap()
            })
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
