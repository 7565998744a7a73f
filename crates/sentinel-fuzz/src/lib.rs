//! Fuzzing library for pubmed-affiliations.
//!
//! This crate provides fuzzing targets for the E-utilities XML extractor.
//!
//! # Usage
//!
//! ```bash
//! cd crates/sentinel-fuzz
//! cargo +nightly fuzz run fuzz_efetch_parse -- -max_total_time=60
//! ```

pub use pubmed_affiliations::{classifier, extract};
