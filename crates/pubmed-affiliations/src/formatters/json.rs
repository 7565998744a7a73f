//! JSON report output.

use crate::error::FetchResult;
use crate::models::Paper;

/// Format papers as a pretty-printed JSON array.
pub fn format_papers_json(papers: &[Paper]) -> FetchResult<String> {
    Ok(serde_json::to_string_pretty(papers)?)
}
