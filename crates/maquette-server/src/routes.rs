//! API route handlers.
//!
//! JSON in, JSON out, except `/download/{id}` which streams the export's
//! `index.html` as an attachment. Handler failures collapse to the uniform
//! error policy in [`crate::error`]: a short message under a 404 or 500.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use maquette_export::ExportRequest;
use maquette_store::{CatalogEntry, ProjectSummary};

use crate::error::ApiError;
use crate::server::AppState;

/// Build the `/api` subrouter.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/templates", get(list_templates))
        .route("/sections", get(list_sections))
        .route("/projects", post(save_project).get(list_projects))
        .route("/projects/{id}", get(load_project))
        .route("/upload", post(upload_asset))
        .route("/export", post(export_page))
        .route("/download/{id}", get(download_export))
}

async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let templates = state.catalog.list_templates().map_err(|e| {
        tracing::error!("template listing failed: {}", e);
        ApiError::internal("Failed to list templates")
    })?;

    Ok(Json(templates))
}

async fn list_sections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let sections = state.catalog.list_sections().map_err(|e| {
        tracing::error!("section listing failed: {}", e);
        ApiError::internal("Failed to list sections")
    })?;

    Ok(Json(sections))
}

#[derive(Debug, Serialize)]
struct SaveProjectResponse {
    success: bool,
    id: String,
}

async fn save_project(
    State(state): State<Arc<AppState>>,
    Json(project): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.projects.save(project).map_err(|e| {
        tracing::error!("project save failed: {}", e);
        ApiError::internal("Failed to save project")
    })?;

    Ok(Json(SaveProjectResponse { success: true, id }))
}

async fn load_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    // Missing and corrupt documents are deliberately indistinguishable to
    // the caller; the distinction lives in the log line.
    let project = state.projects.load(&id).map_err(|e| {
        tracing::debug!("project {} load failed: {}", id, e);
        ApiError::not_found("Project not found")
    })?;

    Ok(Json(project))
}

async fn list_projects(State(state): State<Arc<AppState>>) -> Json<Vec<ProjectSummary>> {
    let projects = state.projects.list().unwrap_or_else(|e| {
        tracing::warn!("project listing failed: {}", e);
        Vec::new()
    });

    Json(projects)
}

#[derive(Debug, Deserialize)]
struct UploadRequest {
    data: String,
    filename: String,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    success: bool,
    url: String,
}

async fn upload_asset(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UploadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let url = state
        .uploads
        .store(&request.data, &request.filename)
        .map_err(|e| {
            tracing::error!("upload of {} failed: {}", request.filename, e);
            ApiError::internal("Upload failed")
        })?;

    Ok(Json(UploadResponse { success: true, url }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportResponse {
    success: bool,
    export_id: String,
    download_url: String,
}

async fn export_page(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.exports.export(&request).map_err(|e| {
        tracing::error!("export failed: {}", e);
        ApiError::internal("Export failed")
    })?;

    Ok(Json(ExportResponse {
        success: true,
        export_id: record.export_id,
        download_url: record.download_url,
    }))
}

async fn download_export(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let index_path = state.exports.resolve_download(&id).map_err(|e| {
        tracing::debug!("download of export {} failed: {}", id, e);
        ApiError::not_found("Export not found")
    })?;

    let body = tokio::fs::read(&index_path).await.map_err(|e| {
        tracing::debug!("export {} index unreadable: {}", id, e);
        ApiError::not_found("Export not found")
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"index.html\"",
            ),
        ],
        body,
    ))
}
