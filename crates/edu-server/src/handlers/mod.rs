//! Route handlers. Each returns the JSON envelope or an [`AppError`](crate::error::AppError).

pub mod documents;
pub mod posts;

use axum::Json;
use axum::http::Uri;
use edu_core::responses::ApiResponse;

use crate::error::AppError;

/// `GET /`
pub async fn welcome() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Welcome to the edushare API"))
}

/// Fallback for unmatched paths, so they get the JSON envelope too.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
