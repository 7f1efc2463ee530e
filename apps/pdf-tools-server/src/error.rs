//! Error types for the PDF Tools server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::archive::ArchiveError;
use crate::pdf::PdfError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid split parameters: {0}")]
    SplitParams(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Multipart(e) => (e.status(), "bad_request", e.body_text()),
            AppError::SplitParams(e) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                format!("Invalid split parameters: {}", e),
            ),
            AppError::Pdf(e) => {
                tracing::warn!("PDF error: {}", e);
                match e {
                    PdfError::Malformed(_) => (
                        StatusCode::BAD_REQUEST,
                        "invalid_pdf",
                        "Uploaded file is not a readable PDF".to_string(),
                    ),
                    PdfError::Encrypted => (
                        StatusCode::BAD_REQUEST,
                        "encrypted_pdf",
                        "Encrypted PDFs are not supported".to_string(),
                    ),
                    _ => (StatusCode::UNPROCESSABLE_ENTITY, "pdf_error", e.to_string()),
                }
            }
            AppError::Archive(e) => {
                tracing::error!("Archive error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Failed to build archive".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Join(e) => {
                tracing::error!("Task join error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Pdf(PdfError::Malformed("bad xref".into())),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Pdf(PdfError::Encrypted), StatusCode::BAD_REQUEST),
            (
                AppError::Pdf(PdfError::Write("disk".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
