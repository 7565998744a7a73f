//! Paper record produced from a PubMed efetch response.

use std::fmt;

use serde::Serialize;

/// Publication year placeholder when the record carries none.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Separator for multi-valued fields in flat reports.
pub const LIST_SEPARATOR: &str = "; ";

/// A PubMed article with its non-academic authors.
///
/// Author names and affiliations are kept in two aligned lists; the only way to
/// add to them is [`PaperBuilder::push_non_academic`], which appends to both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pubmed_id: String,
    title: String,
    publication_date: String,
    non_academic_authors: Vec<String>,
    company_affiliations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corresponding_author_email: Option<String>,
}

impl Paper {
    /// Start building a paper for the given PMID.
    #[must_use]
    pub fn builder(pubmed_id: impl Into<String>) -> PaperBuilder {
        PaperBuilder::new(pubmed_id)
    }

    /// PubMed identifier.
    #[must_use]
    pub fn pubmed_id(&self) -> &str {
        &self.pubmed_id
    }

    /// Article title, possibly empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publication year, or `"Unknown"`.
    #[must_use]
    pub fn publication_date(&self) -> &str {
        &self.publication_date
    }

    /// Display names of non-academic authors in author order.
    #[must_use]
    pub fn non_academic_authors(&self) -> &[String] {
        &self.non_academic_authors
    }

    /// Affiliations of the non-academic authors, aligned with the names.
    #[must_use]
    pub fn company_affiliations(&self) -> &[String] {
        &self.company_affiliations
    }

    /// First email found in any author affiliation.
    #[must_use]
    pub fn corresponding_author_email(&self) -> Option<&str> {
        self.corresponding_author_email.as_deref()
    }

    /// Check if any author was classified non-academic.
    #[must_use]
    pub fn has_non_academic_authors(&self) -> bool {
        !self.non_academic_authors.is_empty()
    }

    /// Iterate `(author, affiliation)` pairs.
    pub fn non_academic_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.non_academic_authors
            .iter()
            .map(String::as_str)
            .zip(self.company_affiliations.iter().map(String::as_str))
    }

    /// Author names joined with `"; "`.
    #[must_use]
    pub fn authors_joined(&self) -> String {
        self.non_academic_authors.join(LIST_SEPARATOR)
    }

    /// Affiliations joined with `"; "`.
    #[must_use]
    pub fn affiliations_joined(&self) -> String {
        self.company_affiliations.join(LIST_SEPARATOR)
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PubmedID: {}", self.pubmed_id)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Publication Date: {}", self.publication_date)?;
        if self.non_academic_authors.is_empty() {
            writeln!(f, "Non-academic Author(s): none")?;
        } else {
            writeln!(f, "Non-academic Author(s):")?;
            for (author, affiliation) in self.non_academic_entries() {
                writeln!(f, "  - {author} ({affiliation})")?;
            }
        }
        write!(
            f,
            "Corresponding Author Email: {}",
            self.corresponding_author_email.as_deref().unwrap_or("-")
        )
    }
}

/// Incremental constructor used by the record extractor.
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Create a builder with empty title, unknown date and no authors.
    #[must_use]
    pub fn new(pubmed_id: impl Into<String>) -> Self {
        Self {
            paper: Paper {
                pubmed_id: pubmed_id.into(),
                title: String::new(),
                publication_date: UNKNOWN_DATE.to_string(),
                non_academic_authors: Vec::new(),
                company_affiliations: Vec::new(),
                corresponding_author_email: None,
            },
        }
    }

    /// Replace the PMID.
    #[must_use]
    pub fn pubmed_id(mut self, pubmed_id: impl Into<String>) -> Self {
        self.paper.pubmed_id = pubmed_id.into();
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.paper.title = title.into();
        self
    }

    /// Set the publication year; blank values keep `"Unknown"`.
    #[must_use]
    pub fn publication_date(mut self, year: impl Into<String>) -> Self {
        let year = year.into();
        if !year.trim().is_empty() {
            self.paper.publication_date = year;
        }
        self
    }

    /// Record a non-academic author together with the affiliation that classified them.
    pub fn push_non_academic(&mut self, author: impl Into<String>, affiliation: impl Into<String>) {
        self.paper.non_academic_authors.push(author.into());
        self.paper.company_affiliations.push(affiliation.into());
    }

    /// Check if a corresponding email has been recorded.
    #[must_use]
    pub fn has_email(&self) -> bool {
        self.paper.corresponding_author_email.is_some()
    }

    /// Record the corresponding email unless one is already set.
    pub fn offer_email(&mut self, email: Option<String>) {
        if self.paper.corresponding_author_email.is_none() {
            self.paper.corresponding_author_email = email;
        }
    }

    /// Finish construction.
    #[must_use]
    pub fn build(self) -> Paper {
        self.paper
    }
}
