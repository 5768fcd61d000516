//! Request handlers for the proxy API.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::AppState;
use crate::error::PortalError;

/// Health check.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    keyword: Option<String>,
    page: Option<u32>,
    status: Option<String>,
}

/// `GET /api/search?keyword&page&status`
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let keyword = params.keyword.unwrap_or_default();
    let page = params.page.unwrap_or(1).max(1);

    match state
        .portal
        .search(&keyword, page, params.status.as_deref())
        .await
    {
        Ok(results) => Json(results).into_response(),
        Err(e) => error_response(e, "Failed to fetch data"),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureParams {
    detail_url: Option<String>,
}

/// `GET /api/procedure?detailUrl`
pub async fn api_procedure(
    State(state): State<AppState>,
    Query(params): Query<ProcedureParams>,
) -> Response {
    let detail_url = params.detail_url.unwrap_or_default();

    match state.portal.procedure_links(&detail_url).await {
        Ok(links) => Json(links).into_response(),
        Err(e) => error_response(e, "Failed to fetch procedure links"),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsParams {
    procedure_url: Option<String>,
}

/// `GET /api/documents?procedureUrl`
///
/// Server-driven pagination: walks every listing page of the procedure and
/// returns the aggregated document list.
pub async fn api_documents(
    State(state): State<AppState>,
    Query(params): Query<DocumentsParams>,
) -> Response {
    let procedure_url = params.procedure_url.unwrap_or_default();

    match state.portal.document_list(&procedure_url).await {
        Ok(list) => Json(list).into_response(),
        Err(e) => error_response(e, "Failed to fetch document links"),
    }
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    url: Option<String>,
}

/// `GET /api/download?url`
///
/// Streams the upstream document through without buffering, re-emitting the
/// upstream content type and a clean attachment filename.
pub async fn api_download(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Response {
    let url = params.url.unwrap_or_default();

    let upstream = match state.portal.fetch_document(&url).await {
        Ok(r) => r,
        Err(e) => return error_response(e, "Failed to download document"),
    };

    let content_type = upstream
        .content_type()
        .unwrap_or("application/pdf")
        .to_string();
    let filename = upstream
        .content_disposition_filename()
        .unwrap_or_else(|| "document.pdf".to_string())
        .replace('"', "_");

    let body = Body::from_stream(upstream.into_inner().bytes_stream());
    match Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(body)
    {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to build download response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to download document", "details": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Map a portal error onto the JSON error contract: validation failures are
/// 400 `{error}`, everything upstream is 500 `{error, details}`.
fn error_response(err: PortalError, message: &str) -> Response {
    if err.is_validation() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response();
    }

    error!("{}: {}", message, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message, "details": err.to_string() })),
    )
        .into_response()
}
