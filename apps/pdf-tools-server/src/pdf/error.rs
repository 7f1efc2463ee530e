//! PDF error types

use thiserror::Error;

/// Errors raised by the PDF adapter
#[derive(Debug, Error)]
pub enum PdfError {
    /// Bytes could not be parsed as a PDF
    #[error("Malformed PDF: {0}")]
    Malformed(String),

    /// Document is encrypted and cannot be read without a password
    #[error("PDF is encrypted")]
    Encrypted,

    /// Page index outside the document
    #[error("Page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    /// Text extraction failed for a page (1-indexed in the message)
    #[error("Text extraction failed on page {page}: {message}")]
    TextExtraction { page: usize, message: String },

    /// Serializing a new document failed
    #[error("Failed to write PDF: {0}")]
    Write(String),
}

/// Result type alias for PDF operations
pub type PdfResult<T> = std::result::Result<T, PdfError>;

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        PdfError::Malformed(err.to_string())
    }
}
