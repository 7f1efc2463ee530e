//! PDF reader/writer adapter
//!
//! Exposes the narrow capability the service needs (page count, per-page
//! text, page subsets, merging) behind [`PdfEngine`] and [`PdfDocument`],
//! with a concrete implementation on top of `lopdf`.

mod error;
mod lopdf_engine;
mod traits;

pub use error::{PdfError, PdfResult};
pub use lopdf_engine::{LopdfDocument, LopdfEngine};
pub use traits::{PdfDocument, PdfEngine};
