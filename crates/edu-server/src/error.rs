//! Handler error type and its JSON rendering.
//!
//! Every failure leaves the server as the standard envelope with
//! `success: false`. Storage failures are logged and reported as 500.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use edu_core::errors::CoreError;
use edu_core::responses::ApiResponse;
use edu_db::error::DatabaseError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidRequest(msg) => Self::InvalidRequest(msg),
            err @ CoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            CoreError::Conflict(msg) => Self::Conflict(msg),
            CoreError::Other(err) => Self::Internal(err),
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Core(core) => core.into(),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Internal(err) => {
                error!("Request failed: {err:#}");
                ApiResponse::failure("Internal Server Error", Some(err.to_string()))
            }
            other => {
                warn!(status = status.as_u16(), "{other}");
                ApiResponse::failure(other.to_string(), None)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_client_statuses() {
        let cases = [
            (
                AppError::from(CoreError::InvalidRequest("stream is required".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(CoreError::not_found("post", "pst-00000000")),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(CoreError::Conflict("taken".into())),
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err}");
        }
    }

    #[test]
    fn wrapped_core_error_keeps_status() {
        let err = AppError::from(DatabaseError::Core(CoreError::Conflict("dup".into())));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn storage_errors_are_internal() {
        let err = AppError::from(DatabaseError::NoResult);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(DatabaseError::Query("bad".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
