use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CandidateId, DocumentSubmission};
use super::export::EXPORT_FILE_NAME;
use super::ranking::{FilterOutcome, SortKey};
use super::repository::{CandidateRepository, RepositoryError};
use super::service::{CandidateService, CandidateServiceError, IngestReport, RankingOutcome};
use super::views::{CandidateDetailView, CandidateSummary, RankingView};

/// Router builder exposing HTTP endpoints for ingest, ranking, and export.
pub fn candidate_router<R>(service: Arc<CandidateService<R>>) -> Router
where
    R: CandidateRepository + 'static,
{
    Router::new()
        .route("/api/v1/candidates", post(ingest_handler::<R>))
        .route("/api/v1/candidates/ranking", get(ranking_handler::<R>))
        .route("/api/v1/candidates/export", get(export_handler::<R>))
        .route(
            "/api/v1/candidates/:candidate_id",
            get(detail_handler::<R>).delete(delete_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub documents: Vec<DocumentSubmission>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RankingQuery {
    #[serde(default)]
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Ranking endpoint payload; `status` separates "nothing ingested" from
/// "nothing matched".
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankingResponse {
    Ranked(RankingView),
    NoCandidates,
    NoMatches { query: String },
}

pub(crate) async fn ingest_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    axum::Json(request): axum::Json<IngestRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    if request.documents.is_empty() {
        let payload = json!({ "error": "no documents supplied" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let documents = request
        .documents
        .into_iter()
        .map(DocumentSubmission::into_result);

    match service.ingest(documents) {
        Ok(report) => ingest_response(report),
        Err(other) => error_response(other),
    }
}

/// Shared response shape for every ingest entry point.
pub fn ingest_response(report: IngestReport) -> Response {
    let status = if report.processed > 0 {
        StatusCode::CREATED
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    let payload = json!({
        "message": report.message(),
        "processed": report.processed,
        "skipped": report.skipped,
        "candidates": report.candidates,
        "skipped_documents": report.skipped_documents,
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn ranking_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Query(params): Query<RankingQuery>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let sort = params.sort.unwrap_or(service.settings().default_sort);
    let ranking = match service.rank(sort) {
        Ok(RankingOutcome::Ranked(ranking)) => ranking,
        Ok(RankingOutcome::NoCandidates) => {
            return (StatusCode::OK, axum::Json(RankingResponse::NoCandidates)).into_response();
        }
        Err(other) => return error_response(other),
    };

    let query = params.q.unwrap_or_default();
    let body = if query.trim().is_empty() {
        RankingResponse::Ranked(RankingView::from_ranking(&ranking))
    } else {
        match ranking.filter(&query) {
            FilterOutcome::Matches(matches) => {
                RankingResponse::Ranked(RankingView::from_matches(&ranking, &query, &matches))
            }
            FilterOutcome::NoMatches => RankingResponse::NoMatches { query },
        }
    };

    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Query(params): Query<RankingQuery>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let sort = params.sort.unwrap_or(service.settings().default_sort);
    match service.export_csv(sort) {
        Ok(Some(csv)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            csv,
        )
            .into_response(),
        Ok(None) => {
            let payload = json!({
                "status": "no_candidates",
                "error": "no results to export",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let id = CandidateId(candidate_id);
    match service.get(&id) {
        Ok(record) => {
            let view = CandidateDetailView::from_record(&record, service.settings().preview_chars);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let id = CandidateId(candidate_id);
    match service.delete(&id) {
        Ok(record) => {
            let payload = json!({ "deleted": CandidateSummary::from(&record) });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

fn error_response(error: CandidateServiceError) -> Response {
    match error {
        CandidateServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "candidate not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
