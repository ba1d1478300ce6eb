//! Blog post routes.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use edu_core::entities::{NewPost, Post};
use edu_core::enums::Reaction;
use edu_core::responses::ApiResponse;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// `GET /allPost`
pub async fn all_posts(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Post>>>> {
    let posts = state.db.list_posts().await?;
    Ok(Json(ApiResponse::ok("Data fetched", posts)))
}

/// `GET /singlePost/{id}`. Counts as a view.
pub async fn single_post(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<ApiResponse<Post>>> {
    let Path(id) = id?;
    let post = state.db.view_post(&id).await?;
    Ok(Json(ApiResponse::ok("Post fetched", post)))
}

/// `POST /posts/{postId}/{type}` where `type` is `like` or `dislike`.
pub async fn react(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> AppResult<Json<ApiResponse<Post>>> {
    let Path((post_id, kind)) = path?;
    let reaction: Reaction = kind.parse()?;
    let post = state.db.react_to_post(&post_id, reaction).await?;
    Ok(Json(ApiResponse::ok(format!("{reaction} count updated"), post)))
}

/// `GET /fetchCategory`
pub async fn fetch_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let categories = state.db.distinct_categories().await?;
    if categories.is_empty() {
        return Err(AppError::NotFound("No categories found".to_string()));
    }
    Ok(Json(ApiResponse::ok("Categories fetched", categories)))
}

/// `POST /createPost`
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Post>>)> {
    let Json(new_post) = payload?;
    let post = state.db.create_post(&new_post).await?;
    info!(id = %post.id, title = %post.title, "Post created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Post created successfully", post)),
    ))
}
