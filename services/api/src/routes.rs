use crate::documents::{is_pdf_mime, UploadedFile};
use crate::infra::AppState;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use resume_ranker::candidates::{
    candidate_router, ingest_response, CandidateRepository, CandidateService,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

const DEFAULT_UPLOAD_NAME: &str = "upload.pdf";
const RESUME_FIELD: &str = "resumes";
const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadQuery {
    #[serde(default)]
    pub(crate) file_name: Option<String>,
}

pub(crate) fn with_candidate_routes<R>(service: Arc<CandidateService<R>>) -> axum::Router
where
    R: CandidateRepository + 'static,
{
    let uploads = axum::Router::new()
        .route(
            "/api/v1/candidates/upload",
            axum::routing::post(upload_endpoint::<R>),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(service.clone());

    candidate_router(service)
        .merge(uploads)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Résumé upload. Accepts `multipart/form-data` with repeated `resumes`
/// parts, or a single raw `application/pdf` body named by `?file_name=`.
/// Parts that are not PDFs or whose text cannot be read are skipped and
/// listed in the report.
pub(crate) async fn upload_endpoint<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Query(params): Query<UploadQuery>,
    request: Request,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let content_type = content_type_essence(request.headers());

    let files = if content_type.eq_ignore_ascii_case("multipart/form-data") {
        let multipart = match Multipart::from_request(request, &()).await {
            Ok(multipart) => multipart,
            Err(rejection) => return rejection.into_response(),
        };
        match read_resume_parts(multipart).await {
            Ok(files) => files,
            Err(err) => return multipart_error(err),
        }
    } else if is_pdf_mime(&content_type) {
        let body = match Bytes::from_request(request, &()).await {
            Ok(body) => body,
            Err(rejection) => return rejection.into_response(),
        };
        if body.is_empty() {
            Vec::new()
        } else {
            vec![UploadedFile {
                file_name: upload_name(params.file_name),
                declared_pdf: true,
                bytes: body.to_vec(),
            }]
        }
    } else {
        return bad_request("Only PDF files are allowed");
    };

    if files.is_empty() {
        return bad_request("No files uploaded");
    }

    let outcome = tokio::task::spawn_blocking(move || {
        let documents = files
            .into_iter()
            .map(UploadedFile::into_document)
            .collect::<Vec<_>>();
        service.ingest(documents)
    })
    .await;

    match outcome {
        Ok(Ok(report)) => ingest_response(report),
        Ok(Err(err)) => {
            error!(error = %err, "upload ingest failed");
            internal_error(err.to_string())
        }
        Err(join_error) => {
            error!(error = %join_error, "upload worker failed");
            internal_error("upload processing failed".to_string())
        }
    }
}

async fn read_resume_parts(
    mut multipart: Multipart,
) -> Result<Vec<UploadedFile>, MultipartError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            debug!(field = ?field.name(), "ignoring form field");
            continue;
        }

        let file_name = upload_name(field.file_name().map(str::to_string));
        let declared_pdf = field.content_type().map(is_pdf_mime).unwrap_or(false);
        let bytes = field.bytes().await?;
        files.push(UploadedFile {
            file_name,
            declared_pdf,
            bytes: bytes.to_vec(),
        });
    }
    Ok(files)
}

fn upload_name(candidate: Option<String>) -> String {
    candidate
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string())
}

fn content_type_essence(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn multipart_error(err: MultipartError) -> Response {
    (err.status(), Json(json!({ "error": err.body_text() }))).into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
