//! Database error types for edu-db.

use edu_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema bootstrap failed.
    #[error("Schema setup failed: {0}")]
    Schema(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Domain error raised by a repository (not found, conflict, bad input).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
