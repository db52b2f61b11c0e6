//! # Database Errors
//!
//! ```text
//! sqlx::Error ──┐
//! MigrateError ─┼──► DbError ──► ApiError (pantry-api) ──► {"error": "..."}
//! argon2 error ─┘
//! ```
//!
//! Constraint failures are recognised from SQLite's message text, e.g.
//! `UNIQUE constraint failed: users.email`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// No row for the given id.
    ///
    /// ## When This Occurs
    /// - DELETE affected no rows
    /// - Parent list missing when adding an item
    /// - Item missing from the list it was addressed under
    #[error("{entity} {id} does not exist")]
    NotFound { entity: String, id: String },

    /// A UNIQUE column already holds the value.
    ///
    /// `field` is the bare column name (`username`, `email`).
    #[error("{field} '{value}' is already taken")]
    UniqueViolation { field: String, value: String },

    /// The file could not be opened or the pool is closed.
    #[error("Cannot open database: {0}")]
    ConnectionFailed(String),

    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement.
    #[error("Statement failed: {0}")]
    QueryFailed(String),

    /// A transaction could not complete and was rolled back.
    #[error("Transaction aborted: {0}")]
    TransactionFailed(String),

    /// No connection became free within the acquire timeout.
    #[error("Timed out waiting for a database connection")]
    PoolExhausted,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Unexpected database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", "?"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                match message.strip_prefix("UNIQUE constraint failed: ") {
                    // The offending value is not part of SQLite's message
                    Some(target) => DbError::duplicate(unique_column(target), "?"),
                    None => DbError::QueryFailed(message.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),

            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// `"users.email"` → `"email"`. Composite keys keep their first column.
fn unique_column(target: &str) -> &str {
    let first = target.split(',').next().unwrap_or(target).trim();
    first.rsplit('.').next().unwrap_or(first)
}

pub type DbResult<T> = Result<T, DbError>;
