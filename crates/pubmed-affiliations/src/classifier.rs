//! Affiliation heuristics: academic keyword matching and email extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::keywords;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

/// Classifies free-text affiliations as academic or non-academic.
///
/// An affiliation is non-academic when none of the keywords occurs in it,
/// compared case-insensitively as plain substrings.
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
    keywords: Vec<String>,
}

impl AffiliationClassifier {
    /// Build a classifier from an ordered keyword list.
    ///
    /// Blank keywords are dropped; an empty needle would match every affiliation.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Keywords in match order, lower-cased.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns true if the affiliation contains no academic keyword.
    #[must_use]
    pub fn is_non_academic(&self, affiliation: &str) -> bool {
        let haystack = affiliation.to_lowercase();
        !self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        Self::new(keywords::ACADEMIC)
    }
}

/// Classify with the default academic keywords.
#[must_use]
pub fn is_non_academic(affiliation: &str) -> bool {
    AffiliationClassifier::default().is_non_academic(affiliation)
}

/// Find the first email address in a piece of text.
#[must_use]
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}
