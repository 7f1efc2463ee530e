//! PDF Tools Server Library
//!
//! Stateless HTTP service for four document operations:
//!
//! - `compare`: line diff of two PDFs' extracted text
//! - `pdf` + merge: concatenate PDFs in order
//! - `split` + `archive`: page ranges packaged as a zip
//! - `summarize`: extractive summary of a PDF's text
//!
//! The binary in main.rs only loads configuration and serves [`routes::app`].

pub mod archive;
pub mod compare;
pub mod config;
pub mod error;
pub mod pdf;
pub mod routes;
pub mod split;
pub mod state;
pub mod summarize;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use routes::app;
pub use state::AppState;
