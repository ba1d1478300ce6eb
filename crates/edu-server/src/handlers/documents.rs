//! Papers, syllabi and study materials.
//!
//! The three collections share one shape, so every handler here is a thin
//! wrapper choosing a [`DocumentKind`] over a shared implementation.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use edu_core::entities::EducationalDocument;
use edu_core::enums::DocumentKind;
use edu_core::filter::DocumentFilter;
use edu_core::responses::ApiResponse;
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

type DocumentsResponse = Json<ApiResponse<Vec<EducationalDocument>>>;

/// Path segments of the filtered routes: `/{stream}/{branch}/{branchYear}`.
#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub stream: String,
    pub branch: String,
    #[serde(rename = "branchYear")]
    pub branch_year: String,
}

const fn label(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Paper => "papers",
        DocumentKind::Syllabus => "syllabi",
        DocumentKind::StudyMaterial => "study materials",
    }
}

async fn filtered(
    state: &AppState,
    kind: DocumentKind,
    params: &FilterParams,
) -> AppResult<DocumentsResponse> {
    let filter = DocumentFilter::resolve(&params.stream, &params.branch, &params.branch_year)?;
    debug!(%kind, %filter, "Filtered document request");

    let documents = state.db.find_documents(kind, &filter).await?;
    if documents.is_empty() {
        return Err(AppError::NotFound(format!(
            "No {} found for the given filter",
            label(kind)
        )));
    }

    Ok(Json(ApiResponse::ok(
        format!("{} fetched", capitalized(label(kind))),
        documents,
    )))
}

async fn dump(state: &AppState, kind: DocumentKind) -> AppResult<DocumentsResponse> {
    let documents = state.db.list_documents(kind).await?;
    if documents.is_empty() {
        return Err(AppError::NotFound(format!("No {} found", label(kind))));
    }
    Ok(Json(ApiResponse::ok("Data fetched", documents)))
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// `GET /getPdfs`. An empty collection is still a success.
pub async fn all_papers(State(state): State<AppState>) -> AppResult<DocumentsResponse> {
    let papers = state.db.list_documents(DocumentKind::Paper).await?;
    Ok(Json(ApiResponse::ok("Data fetched", papers)))
}

/// `GET /getPdfs/{stream}/{branch}/{branchYear}`
pub async fn papers_by_filter(
    State(state): State<AppState>,
    params: Result<Path<FilterParams>, PathRejection>,
) -> AppResult<DocumentsResponse> {
    let Path(params) = params?;
    filtered(&state, DocumentKind::Paper, &params).await
}

/// `GET /getSyllabus/{stream}/{branch}/{branchYear}`
pub async fn syllabi_by_filter(
    State(state): State<AppState>,
    params: Result<Path<FilterParams>, PathRejection>,
) -> AppResult<DocumentsResponse> {
    let Path(params) = params?;
    filtered(&state, DocumentKind::Syllabus, &params).await
}

/// `GET /getStudyMaterials/{stream}/{branch}/{branchYear}`
pub async fn study_materials_by_filter(
    State(state): State<AppState>,
    params: Result<Path<FilterParams>, PathRejection>,
) -> AppResult<DocumentsResponse> {
    let Path(params) = params?;
    filtered(&state, DocumentKind::StudyMaterial, &params).await
}

/// `GET /Cpdf`
pub async fn dump_papers(State(state): State<AppState>) -> AppResult<DocumentsResponse> {
    dump(&state, DocumentKind::Paper).await
}

/// `GET /CSyllabus`
pub async fn dump_syllabi(State(state): State<AppState>) -> AppResult<DocumentsResponse> {
    dump(&state, DocumentKind::Syllabus).await
}

/// `GET /CS`
pub async fn dump_study_materials(State(state): State<AppState>) -> AppResult<DocumentsResponse> {
    dump(&state, DocumentKind::StudyMaterial).await
}
