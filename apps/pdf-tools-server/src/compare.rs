//! Line-based text comparison
//!
//! Produces a unified diff over the extracted text of two documents. Only
//! text is compared: two PDFs that differ in layout, fonts or images but
//! extract to the same text are reported as identical.

use similar::{ChangeTag, TextDiff};

/// Returned instead of an empty diff when both texts have the same lines
pub const NO_DIFFERENCES: &str = "No differences found.";

/// Unified diff settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Unchanged lines shown around each change
    pub context_lines: usize,
    /// Name shown on the `---` header line
    pub old_label: String,
    /// Name shown on the `+++` header line
    pub new_label: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: 3,
            old_label: "pdf1".to_string(),
            new_label: "pdf2".to_string(),
        }
    }
}

/// Diff two texts line by line.
///
/// Output lines carry no terminators: a `---`/`+++` header pair, then per hunk
/// an `@@ -a,b +c,d @@` header followed by lines prefixed with ` `, `-` or `+`.
/// Identical inputs yield exactly `[NO_DIFFERENCES]`.
pub fn diff_lines(old: &str, new: &str, options: &DiffOptions) -> Vec<String> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    let diff = TextDiff::from_slices(&old_lines, &new_lines);
    let mut unified = diff.unified_diff();
    unified.context_radius(options.context_lines);

    let mut output = Vec::new();
    for hunk in unified.iter_hunks() {
        if output.is_empty() {
            output.push(format!("--- {}", options.old_label));
            output.push(format!("+++ {}", options.new_label));
        }
        output.push(hunk.header().to_string());
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Equal => ' ',
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
            };
            output.push(format!("{}{}", sign, change.value()));
        }
    }

    if output.is_empty() {
        return vec![NO_DIFFERENCES.to_string()];
    }

    tracing::debug!(
        old_lines = old_lines.len(),
        new_lines = new_lines.len(),
        diff_lines = output.len(),
        "Compared texts"
    );

    output
}
