//! Error types for lightbnb-db
//!
//! Store failures, conflicts and rejected input are distinct variants so
//! callers can tell "no such row" (an `Ok(None)` or empty `Vec`) apart from
//! "the query failed".

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::models::ValidationError;

/// Main error type for lightbnb-db operations
#[derive(Error, Debug)]
pub enum DbError {
    /// Connectivity or statement execution failed
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A unique constraint rejected the row (e.g. duplicate email)
    #[error("conflict: {resource} {detail}")]
    Conflict {
        resource: &'static str,
        detail: String,
    },

    /// Lookup that requires presence found nothing
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Input rejected before reaching the store
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Connection settings could not be turned into connect options
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Seed fixture could not be read or parsed
    #[error("fixture error in {path:?}: {reason}")]
    Fixture { path: PathBuf, reason: String },
}

/// Result type alias for lightbnb-db operations
pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    /// Map an insert failure, turning unique violations into `Conflict`.
    pub fn from_insert(resource: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::Conflict {
                resource,
                detail: db_err
                    .constraint()
                    .map(|c| format!("violates {}", c))
                    .unwrap_or_else(|| db_err.message().to_owned()),
            },
            _ => Self::Sqlx(err),
        }
    }

    pub fn conflict(resource: &'static str, detail: impl Into<String>) -> Self {
        Self::Conflict {
            resource,
            detail: detail.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn fixture(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Fixture {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for `Conflict`
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DbError::conflict("user", "email already registered");
        assert_eq!(err.to_string(), "conflict: user email already registered");
        assert!(err.is_conflict());

        let err = DbError::not_found("property", 42);
        assert_eq!(err.to_string(), "not found: property '42'");
        assert!(!err.is_conflict());
    }

    #[test]
    fn non_database_errors_are_not_conflicts() {
        let err = DbError::from_insert("user", sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn validation_converts() {
        let err: DbError = ValidationError::Empty { field: "name" }.into();
        assert_eq!(err.to_string(), "invalid input: name cannot be empty");
    }
}
