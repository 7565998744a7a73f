//! CSV report output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::FetchResult;
use crate::models::Paper;

/// Column headers, in output order.
pub const CSV_HEADER: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Write papers as CSV with a header row.
///
/// Multi-valued columns are joined with `"; "`; a missing email is an empty field.
pub fn write_csv<W: Write>(papers: &[Paper], writer: W) -> FetchResult<()> {
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    for paper in papers {
        let authors = paper.authors_joined();
        let affiliations = paper.affiliations_joined();
        writer.write_record([
            paper.pubmed_id(),
            paper.title(),
            paper.publication_date(),
            authors.as_str(),
            affiliations.as_str(),
            paper.corresponding_author_email().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write papers to a CSV file, replacing any existing file.
pub fn save_csv(papers: &[Paper], path: impl AsRef<Path>) -> FetchResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(papers, file)?;
    tracing::debug!(path = %path.display(), rows = papers.len(), "Wrote CSV report");
    Ok(())
}
