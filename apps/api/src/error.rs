//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Pantry                                 │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │       │                                                                 │
//! │       ├── JSON / path / query rejection ────────────► 400              │
//! │       ├── ValidationError (pantry-core) ────────────► 400              │
//! │       ├── CoreError::InvalidCredentials ────────────► 401              │
//! │       ├── DbError::NotFound ────────────────────────► 404              │
//! │       ├── DbError::UniqueViolation ─────────────────► 409              │
//! │       └── anything else (logged, message hidden) ───► 500              │
//! │                                                                         │
//! │  Body: {"error": "<message>"}                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use pantry_core::{CoreError, ValidationError};
use pantry_db::DbError;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// { "error": "Shopping list not found" }
/// ```
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Category, decides the status code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input validation failed (400)
    Validation,

    /// Credentials rejected (401)
    Unauthorized,

    /// Resource not found (404)
    NotFound,

    /// Unique field already taken (409)
    Conflict,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::Validation => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::not_found(format!("{entity} not found")),
            DbError::UniqueViolation { field, .. } => ApiError::new(
                ErrorCode::Conflict,
                format!("{} already exists", capitalize(&field)),
            ),
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::internal("Internal server error")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCredentials => ApiError::new(ErrorCode::Unauthorized, err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(json!({ "error": self.message }))).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// `"username"` → `"Username"`.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let err: ApiError = DbError::not_found("Shopping list", 7).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Shopping list not found");

        let err: ApiError = DbError::duplicate("email", "a@x.com").into();
        assert_eq!(err.code.status(), StatusCode::CONFLICT);
        assert_eq!(err.message, "Email already exists");

        let err: ApiError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::InvalidCredentials.into();
        assert_eq!(err.code.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid username or password");

        let err: ApiError = CoreError::from(ValidationError::NothingToUpdate).into();
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.message, "No fields to update");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("username"), "Username");
        assert_eq!(capitalize(""), "");
    }
}
