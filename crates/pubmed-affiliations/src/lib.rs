//! PubMed Industry Affiliation Finder
//!
//! Searches PubMed through the NCBI E-utilities API and reports, for every matching
//! paper, the authors whose affiliations look non-academic (pharmaceutical, biotech
//! and other company addresses).
//!
//! # Pipeline
//!
//! 1. `esearch` turns a query into a list of PMIDs
//! 2. `efetch` returns the XML records for those PMIDs
//! 3. each author affiliation is checked against a list of academic keywords
//! 4. papers are reported as text, JSON or CSV
//!
//! # Example
//!
//! ```no_run
//! use pubmed_affiliations::{client::PubMedClient, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = PubMedClient::new(config)?;
//!
//!     for paper in client.search("cancer treatment").await? {
//!         println!("{paper}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod formatters;
pub mod models;

pub use classifier::{AffiliationClassifier, extract_email, is_non_academic};
pub use client::PubMedClient;
pub use config::Config;
pub use error::{FetchError, FetchResult};
pub use models::Paper;
