//! Cross-cutting error types for edushare.
//!
//! This module defines errors that can originate from any crate in the system.
//! Storage errors (`DatabaseError`) and configuration errors (`ConfigError`) live
//! in their own crates; the HTTP layer folds all of them into `AppError`.

use thiserror::Error;

/// Errors that can be raised by any edushare crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A path or body parameter is missing or malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Entity lookup or filtered query returned no result.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A unique field already holds the given value.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}
