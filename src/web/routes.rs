//! HTTP routes: upload page, analysis endpoint and health check.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Multipart, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::Serialize;

use crate::config::settings::Settings;
use crate::error::PrintCostError;
use crate::pipeline::estimator::estimate;
use crate::pipeline::report::CostReport;

const INDEX_HTML: &str = include_str!("index.html");

/// Application state shared across handlers.
///
/// Only read-only configuration; every request is handled independently.
pub struct AppState {
    pub settings: Settings,
    pub version: String,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Build the application routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_page))
        .route("/analyze", post(analyze))
        .route("/health", get(health_check))
}

async fn index_page() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        INDEX_HTML,
    )
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.version.clone(),
    })
}

/// Accept a multipart upload in the `file` field and return its cost estimate.
///
/// Only the first `file` part is read.
async fn analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<CostReport>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| AppError::BadRequest("No file".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::BadRequest("No selected file".to_string()));
    }

    tracing::info!(filename = %filename, bytes = data.len(), "upload received");

    // Rasterization and analysis are CPU bound
    let settings = state.settings.clone();
    let report = tokio::task::spawn_blocking(move || estimate(&filename, &data, &settings))
        .await
        .map_err(|e| AppError::Internal(format!("analysis task failed: {e}")))??;

    Ok(Json(report))
}

/// API error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
    Upload(MultipartError),
}

impl From<PrintCostError> for AppError {
    fn from(e: PrintCostError) -> Self {
        if e.is_client_error() {
            AppError::BadRequest(e.to_string())
        } else {
            tracing::error!(error = %e, "analysis failed");
            AppError::Internal(e.to_string())
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Upload(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Upload(e) => (e.status(), e.body_text()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
