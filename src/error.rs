// HTTP API Error Types
use axum::response::{IntoResponse, Response};

use crate::database::DatabaseError;
use crate::normalize::NormalizeError;
use crate::response::{Envelope, HttpCode, HttpResp};

/// API error rendered as an envelope carrying a non-success catalog entry.
/// Variants holding a `String` override the catalog message when non-empty.
#[derive(Debug)]
pub enum ApiError {
    // 300
    Failed(String),

    // 31x request problems
    ParamsValid(String),
    ParamsType(String),
    RequestMethod,

    // 33x token
    TokenEmpty,
    TokenInvalid,

    // 403 / 404
    NoPermission(String),
    NotFound,

    // 500 / 504
    SystemError(String),
    Timeout,
}

impl ApiError {
    /// Catalog entry for this error
    pub fn http_code(&self) -> HttpCode {
        match self {
            ApiError::Failed(_) => HttpResp::FAILED,
            ApiError::ParamsValid(_) => HttpResp::PARAMS_VALID_ERROR,
            ApiError::ParamsType(_) => HttpResp::PARAMS_TYPE_ERROR,
            ApiError::RequestMethod => HttpResp::REQUEST_METHOD_ERROR,
            ApiError::TokenEmpty => HttpResp::TOKEN_EMPTY,
            ApiError::TokenInvalid => HttpResp::TOKEN_INVALID,
            ApiError::NoPermission(_) => HttpResp::NO_PERMISSION,
            ApiError::NotFound => HttpResp::REQUEST_404_ERROR,
            ApiError::SystemError(_) => HttpResp::SYSTEM_ERROR,
            ApiError::Timeout => HttpResp::SYSTEM_TIMEOUT_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        let custom = match self {
            ApiError::Failed(msg)
            | ApiError::ParamsValid(msg)
            | ApiError::ParamsType(msg)
            | ApiError::NoPermission(msg)
            | ApiError::SystemError(msg) => msg.as_str(),
            _ => "",
        };
        if custom.is_empty() {
            self.http_code().msg
        } else {
            custom
        }
    }

    pub fn to_envelope(&self) -> Envelope {
        Envelope::failure(self.http_code(), self.message())
    }
}

// Static constructor methods
impl ApiError {
    pub fn failed(message: impl Into<String>) -> Self {
        ApiError::Failed(message.into())
    }

    pub fn params_valid(message: impl Into<String>) -> Self {
        ApiError::ParamsValid(message.into())
    }

    pub fn params_type(message: impl Into<String>) -> Self {
        ApiError::ParamsType(message.into())
    }

    pub fn no_permission(message: impl Into<String>) -> Self {
        ApiError::NoPermission(message.into())
    }

    /// Internal failure; the detail is logged, never sent to the client.
    pub fn system(detail: impl std::fmt::Display) -> Self {
        tracing::error!("Internal error: {}", detail);
        ApiError::SystemError(String::new())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::failed(msg),
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::SystemError(String::new())
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::SystemError(String::new())
            }
        }
    }
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        tracing::error!("Response serialization error: {}", err);
        ApiError::SystemError(String::new())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.http_code().code, self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.to_envelope().into_response()
    }
}
