//! PDF capability traits
//!
//! The rest of the service only sees these two traits, so the underlying
//! PDF library can be swapped without touching the splitter, differ or routes.

use super::error::PdfResult;

/// Read access to one loaded PDF document
pub trait PdfDocument: Send {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Extract plain text from a zero-indexed page
    fn page_text(&self, index: usize) -> PdfResult<String>;

    /// Extract the text of every page, concatenated in page order.
    /// A page break always ends a line.
    fn text(&self) -> PdfResult<String> {
        let mut text = String::new();
        for index in 0..self.page_count() {
            text.push_str(&self.page_text(index)?);
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
        }
        Ok(text)
    }

    /// Build a new serialized document from the given zero-indexed pages, in order.
    ///
    /// An empty slice produces a valid document with no pages.
    fn extract_pages(&self, indices: &[usize]) -> PdfResult<Vec<u8>>;
}

/// Entry point into a PDF library
pub trait PdfEngine: Send + Sync {
    /// Parse raw bytes into a document
    fn open(&self, bytes: &[u8]) -> PdfResult<Box<dyn PdfDocument>>;

    /// Concatenate all pages of all sources, in order, into one serialized document.
    ///
    /// Zero sources produce a valid document with no pages.
    fn merge(&self, sources: &[&[u8]]) -> PdfResult<Vec<u8>>;
}
