//! Document operation endpoints
//!
//! - POST /compare-pdfs/   - Diff the text of two PDFs
//! - POST /merge-pdfs/     - Concatenate PDFs into one
//! - POST /split-pdf/      - Split a PDF into page ranges, returned as a zip
//! - POST /summarize-pdf/  - Extractive summary of a PDF's text
//!
//! Each handler buffers its uploads, runs one operation on the blocking
//! pool and returns the result. Nothing is kept between requests.

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::archive;
use crate::compare::diff_lines;
use crate::error::{AppError, Result};
use crate::pdf::PdfResult;
use crate::routes::form::UploadForm;
use crate::split::{self, SplitRequest};
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Text field carrying `{"pages": [...]}` on split requests
const SPLIT_PARAMS_FIELD: &str = "split_params";

/// Compare response
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub differences: Vec<String>,
}

/// Summarize response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Create the document operations router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/compare-pdfs/", post(compare_pdfs))
        .route("/compare-pdfs", post(compare_pdfs))
        .route("/merge-pdfs/", post(merge_pdfs))
        .route("/merge-pdfs", post(merge_pdfs))
        .route("/split-pdf/", post(split_pdf))
        .route("/split-pdf", post(split_pdf))
        .route("/summarize-pdf/", post(summarize_pdf))
        .route("/summarize-pdf", post(summarize_pdf))
}

/// POST /compare-pdfs/
///
/// Fields `pdf1` and `pdf2`; falls back to the first two uploaded files.
async fn compare_pdfs(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CompareResponse>> {
    let mut form = UploadForm::read(multipart).await?;
    let missing = || AppError::BadRequest("Two PDF files are required ('pdf1' and 'pdf2')".into());
    let first = form.take_file(&["pdf1"]).ok_or_else(missing)?;
    let second = form.take_file(&["pdf2"]).ok_or_else(missing)?;

    let engine = state.engine();
    let options = state.diff_options(first.label(), second.label());

    let differences = tokio::task::spawn_blocking(move || -> PdfResult<Vec<String>> {
        let old = engine.open(&first.data)?.text()?;
        let new = engine.open(&second.data)?.text()?;
        Ok(diff_lines(&old, &new, &options))
    })
    .await??;

    tracing::info!(lines = differences.len(), "Compared PDFs");

    Ok(Json(CompareResponse { differences }))
}

/// POST /merge-pdfs/
///
/// Files under `pdfs` (or `files`), merged in upload order. No files yields
/// an empty PDF.
async fn merge_pdfs(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    let mut form = UploadForm::read(multipart).await?;
    let files = form.take_files(&["pdfs", "files"]);
    let file_count = files.len();

    let engine = state.engine();
    let merged = tokio::task::spawn_blocking(move || {
        let sources: Vec<&[u8]> = files.iter().map(|file| file.data.as_ref()).collect();
        engine.merge(&sources)
    })
    .await??;

    tracing::info!(files = file_count, bytes = merged.len(), "Merged PDFs");

    attachment(PDF_CONTENT_TYPE, "merged.pdf", merged)
}

/// POST /split-pdf/
///
/// File under `pdf` (or `file`), optional `split_params` field with
/// `{"pages": [{"start": 0, "end": 2}, ...]}`, sent as text or as an attached
/// JSON file.
async fn split_pdf(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    let mut form = UploadForm::read_with_text_fields(multipart, &[SPLIT_PARAMS_FIELD]).await?;
    let file = form
        .take_file(&["pdf", "file"])
        .ok_or_else(|| AppError::BadRequest("No PDF provided. Use field name 'pdf' or 'file'".into()))?;

    let request = match form.text(SPLIT_PARAMS_FIELD) {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<SplitRequest>(raw)?,
        _ => SplitRequest::default(),
    };

    let engine = state.engine();
    let zip = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let document = engine.open(&file.data)?;
        let entries = split::split(&*document, request.pages.as_deref())?;
        Ok(archive::pack(&entries)?)
    })
    .await??;

    tracing::info!(bytes = zip.len(), "Split PDF");

    attachment(ZIP_CONTENT_TYPE, "splits.zip", zip)
}

/// POST /summarize-pdf/
///
/// File under `pdf` (or `file`).
async fn summarize_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SummaryResponse>> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form
        .take_file(&["pdf", "file"])
        .ok_or_else(|| AppError::BadRequest("No PDF provided. Use field name 'pdf' or 'file'".into()))?;

    let engine = state.engine();
    let condenser = state.condenser();
    let summary = tokio::task::spawn_blocking(move || -> PdfResult<String> {
        let text = engine.open(&file.data)?.text()?;
        Ok(condenser.condense(&text))
    })
    .await??;

    tracing::info!(chars = summary.chars().count(), "Summarized PDF");

    Ok(Json(SummaryResponse { summary }))
}

fn attachment(content_type: &'static str, file_name: &str, bytes: Vec<u8>) -> Result<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", file_name),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}
