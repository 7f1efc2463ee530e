//! Extractive summarization
//!
//! [`SentenceSummarizer`] is a punctuation heuristic: a sentence ends at
//! `.`, `!` or `?` followed by whitespace (or the end of the text). It
//! mis-splits abbreviations ("e.g. this"), decimals followed by a space and
//! quoted punctuation. Swap in another [`TextCondenser`] for anything smarter.

use std::sync::LazyLock;

use regex::Regex;

/// Sentence terminator followed by whitespace or end of text
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?](?:\s+|$)").expect("valid sentence boundary regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Something that condenses a body of text into a shorter one
pub trait TextCondenser: Send + Sync {
    fn condense(&self, text: &str) -> String;
}

/// Keeps the first few sentences of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSummarizer {
    /// Sentences kept
    pub max_sentences: usize,
    /// Characters kept when no sentence boundary is found
    pub fallback_chars: usize,
}

impl Default for SentenceSummarizer {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            fallback_chars: 1000,
        }
    }
}

impl SentenceSummarizer {
    pub fn new(max_sentences: usize, fallback_chars: usize) -> Self {
        Self {
            max_sentences,
            fallback_chars,
        }
    }
}

impl TextCondenser for SentenceSummarizer {
    fn condense(&self, text: &str) -> String {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return text.chars().take(self.fallback_chars).collect();
        }

        sentences
            .into_iter()
            .take(self.max_sentences)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split text into sentence-like units with internal whitespace collapsed.
///
/// Returns nothing when the text has no boundary at all. Text after the last
/// boundary counts as a final unit.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Keep the terminator, drop the whitespace after it
        let end = boundary.start() + 1;
        push_unit(&mut sentences, &text[start..end]);
        start = boundary.end();
    }

    if !sentences.is_empty() {
        push_unit(&mut sentences, &text[start..]);
    }

    sentences
}

fn push_unit(sentences: &mut Vec<String>, raw: &str) {
    let unit = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    if !unit.is_empty() {
        sentences.push(unit.into_owned());
    }
}
