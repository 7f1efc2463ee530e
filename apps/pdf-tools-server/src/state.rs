//! Application state management

use std::sync::Arc;

use crate::compare::DiffOptions;
use crate::config::Config;
use crate::pdf::{LopdfEngine, PdfEngine};
use crate::summarize::{SentenceSummarizer, TextCondenser};

/// Shared application state
///
/// Holds only immutable configuration and stateless capabilities; every
/// request owns its own document buffers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    engine: Arc<dyn PdfEngine>,
    condenser: Arc<dyn TextCondenser>,
}

impl AppState {
    /// Create state backed by lopdf and the sentence summarizer
    pub fn new(config: Config) -> Self {
        let condenser = SentenceSummarizer::new(
            config.summary.max_sentences,
            config.summary.fallback_chars,
        );
        Self::with_capabilities(config, Arc::new(LopdfEngine::new()), Arc::new(condenser))
    }

    /// Create state with explicit PDF and summarization implementations
    pub fn with_capabilities(
        config: Config,
        engine: Arc<dyn PdfEngine>,
        condenser: Arc<dyn TextCondenser>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                engine,
                condenser,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the PDF engine
    pub fn engine(&self) -> Arc<dyn PdfEngine> {
        self.inner.engine.clone()
    }

    /// Get the summarizer
    pub fn condenser(&self) -> Arc<dyn TextCondenser> {
        self.inner.condenser.clone()
    }

    /// Diff options derived from configuration
    pub fn diff_options(&self, old_label: &str, new_label: &str) -> DiffOptions {
        DiffOptions {
            context_lines: self.inner.config.diff.context_lines,
            old_label: old_label.to_string(),
            new_label: new_label.to_string(),
        }
    }
}
