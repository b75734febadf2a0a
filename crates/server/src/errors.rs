use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use catalog::auth::errors::AuthError;
use catalog::errors::CatalogError;

/// Error envelope returned on every failure path:
/// `{"statusCode": ..., "message": ..., "error": ...}` where `message` is a
/// single string or a list of violation messages and `error` is the
/// canonical status reason.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: ApiMessage,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ApiMessage {
    One(String),
    Many(Vec<String>),
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: ApiMessage::One(message.into()) }
    }

    pub fn bad_request(violations: Vec<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: ApiMessage::Many(violations) }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Generic 500; the cause is logged where it is caught, never sent to
    /// the client.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
            "error": self.status.canonical_reason().unwrap_or("Error"),
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Validation(msg) => ApiError::bad_request(vec![msg]),
            CatalogError::NotFound(msg) => ApiError::not_found(msg),
            CatalogError::Db(msg) => {
                error!(err = %msg, "database error");
                ApiError::internal()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => ApiError::bad_request(vec![msg]),
            AuthError::Conflict => ApiError::conflict("user already exists"),
            AuthError::Unauthorized => ApiError::unauthorized("Invalid credentials"),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                error!(err = %e, code = e.code(), "auth failure");
                ApiError::internal()
            }
        }
    }
}
