//! # Errors
//!
//! Failures that can be decided without touching the database.
//!
//! ```text
//!   request body ──► RequiredFields / validate_* ──► ValidationError ─┐
//!   login attempt ───────────────────────────────► InvalidCredentials ┤
//!                                                                     ▼
//!                                                                CoreError
//!                                                                     │
//!                  pantry-db::DbError ──► pantry-api::ApiError ◄──────┘
//! ```
//!
//! Every `Display` string here is sent to clients verbatim as the `error`
//! field of the response body.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised outside of persistence.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown username or wrong password.
    ///
    /// Both cases share this variant so callers cannot tell them apart.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A request body or parameter was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Why a request was rejected before reaching storage.
///
/// Produced while turning a request body into a validated model, before any
/// database work happens.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// One or more required body fields are absent or blank.
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// A single required value (query parameter, nested field) is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., NaN price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A partial update carried none of the updatable fields.
    #[error("No fields to update")]
    NothingToUpdate,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
