use std::any::Any;

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use jis_site_core::auth::AuthError;
use jis_site_core::document::validate::ValidationError;
use jis_site_core::document::StoreError;
use jis_site_core::mutation::MergeError;
use jis_site_core::upload::UploadError;

/// Message returned in place of internal error detail.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// API error type. Every variant renders as `{ "error": <message> }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Real cause of a masked 500, attached to the response for the
/// development-only detail middleware.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status != StatusCode::INTERNAL_SERVER_ERROR {
            return (status, Json(json!({ "error": self.to_string() }))).into_response();
        }

        let detail = self.to_string();
        tracing::error!(error = %detail, "request failed");
        let mut response = (status, Json(json!({ "error": INTERNAL_MESSAGE }))).into_response();
        response.extensions_mut().insert(ErrorDetail(detail));
        response
    }
}

impl From<MergeError> for ApiError {
    fn from(err: MergeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".into()),
            AuthError::Token(reason) => {
                tracing::debug!(%reason, "token rejected");
                ApiError::Forbidden("Invalid or expired token".into())
            }
            AuthError::MissingSecret | AuthError::Hash(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NoFile => ApiError::BadRequest("No file uploaded".into()),
            UploadError::Rejected(reason) => ApiError::BadRequest(reason),
            UploadError::Io(source) => ApiError::Internal(format!("failed to store upload: {source}")),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("Request body too large".into())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("File too large".into())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

/// Response for a handler that panicked, used by `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
