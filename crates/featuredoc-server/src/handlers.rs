//! HTTP request handlers.
//!
//! Extraction and rendering are CPU-bound, so both run on the blocking pool
//! rather than on the async workers.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use featuredoc_extract::extract;
use featuredoc_render::{DOCX_CONTENT_TYPE, DocumentTitle, json, render};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::GeneratedDocument;
use crate::error::ApiError;
use crate::server::AppState;
use crate::upload::FeatureUpload;

/// Response body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is serving requests.
    pub status: String,
    /// Crate version of the running server.
    pub version: String,
}

/// Response body of a successful `POST /upload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Key under which the generated document is cached.
    pub file_id: String,
    /// Filename supplied by the client.
    pub filename: String,
    /// Document title derived from the filename.
    pub title: String,
    /// Number of scenarios in the document.
    pub scenario_count: usize,
    /// Relative URL from which the document can be fetched.
    pub download_url: String,
}

/// Relative download URL for a cached document.
#[must_use]
pub fn download_path(file_id: &str) -> String {
    format!("/download/{file_id}")
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// Convert an uploaded feature file and cache the resulting document.
///
/// # Errors
/// Returns an [`ApiError`] when the upload is invalid, contains no scenarios,
/// or cannot be rendered.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = FeatureUpload::from_multipart(multipart?, state.config().max_upload_bytes).await?;
    let filename = upload.filename().to_owned();

    let document = tokio::task::spawn_blocking(move || convert(&upload)).await??;
    let title = document.title.to_string();
    let scenario_count = document.scenario_count;
    let file_id = state.cache().insert(document).await;
    info!(%filename, scenario_count, %file_id, "converted feature file");

    Ok(Json(UploadResponse {
        download_url: download_path(&file_id),
        file_id,
        filename,
        title,
        scenario_count,
    }))
}

/// Return the extracted scenarios as JSON without generating a document.
///
/// # Errors
/// Returns an [`ApiError`] when the upload is invalid or contains no
/// scenarios.
pub async fn preview(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let upload = FeatureUpload::from_multipart(multipart?, state.config().max_upload_bytes).await?;

    let (title, records) = tokio::task::spawn_blocking(move || {
        (
            DocumentTitle::from_filename(upload.filename()),
            extract(upload.text()),
        )
    })
    .await?;
    if records.is_empty() {
        return Err(ApiError::NoScenarios);
    }
    debug!(title = %title, scenario_count = records.len(), "previewed feature file");
    Ok(Json(json::to_value(&title, &records)?))
}

/// Serve a cached document as an attachment.
///
/// # Errors
/// Returns [`ApiError::DocumentNotFound`] when the id is unknown or expired.
pub async fn download(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Response, ApiError> {
    let Some(document) = state.cache().get(&file_id).await else {
        return Err(ApiError::DocumentNotFound(file_id));
    };
    debug!(%file_id, bytes = document.bytes.len(), "serving document");

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
        (header::CONTENT_DISPOSITION, attachment_header(&document.title)),
    ];
    Ok((headers, document.bytes.clone()).into_response())
}

/// Extract scenarios from an upload and render them as a document.
///
/// # Errors
/// Returns [`ApiError::NoScenarios`] when nothing was extracted and
/// [`ApiError::Render`] when packaging fails.
pub fn convert(upload: &FeatureUpload) -> Result<GeneratedDocument, ApiError> {
    let records = extract(upload.text());
    let title = DocumentTitle::from_filename(upload.filename());
    let bytes = render(&records, &title)?;
    Ok(GeneratedDocument::new(title, records.len(), bytes))
}

/// Header values must be visible ASCII, so anything else becomes `_`.
fn attachment_header(title: &DocumentTitle) -> HeaderValue {
    let filename: String = title
        .docx_filename()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;

    #[test]
    fn attachment_header_quotes_docx_filename() {
        let value = attachment_header(&DocumentTitle::new("login"));
        assert_eq!(value, "attachment; filename=\"login.docx\"");
    }

    #[test]
    fn attachment_header_replaces_unsafe_characters() {
        let value = attachment_header(&DocumentTitle::new("caf\u{e9} \"q\"/x"));
        assert_eq!(value, "attachment; filename=\"caf_ _q__x.docx\"");
    }

    #[test]
    fn convert_counts_scenarios() {
        let upload = FeatureUpload::from_parts(
            "cart.feature",
            b"Scenario: Add\n  Given a cart\nScenario: Remove\n  Given an item".to_vec(),
            1024,
        )
        .expect("valid upload");
        let document = convert(&upload).expect("document renders");
        assert_eq!(document.scenario_count, 2);
        assert_eq!(document.title.as_str(), "cart");
        assert!(document.bytes.starts_with(b"PK"));
    }

    #[test]
    fn convert_rejects_files_without_scenarios() {
        let upload = FeatureUpload::from_parts("empty.feature", b"Feature: x".to_vec(), 1024)
            .expect("valid upload");
        assert!(matches!(convert(&upload), Err(ApiError::NoScenarios)));
    }
}
