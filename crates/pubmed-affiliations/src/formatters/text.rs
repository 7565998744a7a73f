//! Plain-text output for the terminal.

use crate::models::Paper;

/// Format papers one block per record, separated by blank lines.
#[must_use]
pub fn format_papers_text(papers: &[Paper]) -> String {
    if papers.is_empty() {
        return "No papers found.".to_string();
    }

    papers.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n\n")
}
