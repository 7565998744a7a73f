//! Data models for PubMed records.

mod paper;

pub use paper::{LIST_SEPARATOR, Paper, PaperBuilder, UNKNOWN_DATE};
