//! PubMed E-utilities client.
//!
//! Two sequential calls per search:
//! - `esearch.fcgi` returns the PMIDs matching a query
//! - `efetch.fcgi` returns the full XML records for those PMIDs
//!
//! A failed call is not retried, and requests use the transport's default timeout.

use reqwest::Client;
use url::Url;

use crate::classifier::AffiliationClassifier;
use crate::config::{Config, api};
use crate::error::{FetchError, FetchResult};
use crate::extract;
use crate::models::Paper;

type Params = Vec<(&'static str, String)>;

/// PubMed search-and-fetch client.
#[derive(Clone)]
pub struct PubMedClient {
    /// HTTP client.
    client: Client,

    /// Affiliation classifier applied to every author.
    classifier: AffiliationClassifier,

    /// esearch endpoint.
    esearch_url: Url,

    /// efetch endpoint.
    efetch_url: Url,

    /// Default esearch result cap.
    max_results: u32,

    /// NCBI API key (optional).
    api_key: Option<String>,

    /// Tool name sent to NCBI.
    tool: String,

    /// Contact email sent to NCBI (optional).
    email: Option<String>,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder().gzip(true).build()?;

        // Url::join replaces the last path segment unless the base ends with '/'
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base = Url::parse(&base)?;

        Ok(Self {
            client,
            classifier: AffiliationClassifier::new(&config.academic_keywords),
            esearch_url: base.join(api::ESEARCH)?,
            efetch_url: base.join(api::EFETCH)?,
            max_results: config.max_results,
            api_key: config.api_key,
            tool: config.tool,
            email: config.email,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The classifier used for author affiliations.
    #[must_use]
    pub fn classifier(&self) -> &AffiliationClassifier {
        &self.classifier
    }

    /// Default esearch result cap.
    #[must_use]
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Search PubMed and return matching PMIDs, capped at the configured maximum.
    ///
    /// # Errors
    ///
    /// Returns error on a non-success status, transport failure or malformed XML.
    pub async fn fetch_ids(&self, query: &str) -> FetchResult<Vec<String>> {
        self.fetch_ids_with_limit(query, self.max_results).await
    }

    /// Search PubMed and return at most `max_results` PMIDs in ranking order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a cap outside `1..=100`, otherwise as
    /// [`Self::fetch_ids`]. The query itself is passed through unchecked.
    pub async fn fetch_ids_with_limit(
        &self,
        query: &str,
        max_results: u32,
    ) -> FetchResult<Vec<String>> {
        if !(1..=api::MAX_RETMAX).contains(&max_results) {
            return Err(FetchError::invalid_input(
                "max_results",
                format!("must be between 1 and {}", api::MAX_RETMAX),
            ));
        }

        let params = vec![
            ("db", api::DATABASE.to_string()),
            ("term", query.to_string()),
            ("retmax", max_results.to_string()),
        ];

        let body = self.get_xml(&self.esearch_url, params).await?;
        let ids = extract::parse_id_list(&body)?;

        tracing::debug!(count = ids.len(), ?ids, "Fetched PubMed IDs");
        Ok(ids)
    }

    /// Fetch full records for the given PMIDs and extract non-academic authors.
    ///
    /// An empty id list returns immediately without a request.
    ///
    /// # Errors
    ///
    /// Returns error on a non-success status, transport failure or malformed XML.
    pub async fn fetch_details(&self, ids: &[String]) -> FetchResult<Vec<Paper>> {
        if ids.is_empty() {
            tracing::debug!("No PubMed IDs to fetch");
            return Ok(Vec::new());
        }

        let params = vec![
            ("db", api::DATABASE.to_string()),
            ("id", ids.join(",")),
            ("retmode", "xml".to_string()),
        ];

        let body = self.get_xml(&self.efetch_url, params).await?;
        let papers = extract::parse_papers(&body, &self.classifier)?;

        tracing::debug!(requested = ids.len(), parsed = papers.len(), "Fetched paper details");
        Ok(papers)
    }

    /// Run a search and fetch the details of every hit.
    ///
    /// # Errors
    ///
    /// Returns the first error from either call.
    pub async fn search(&self, query: &str) -> FetchResult<Vec<Paper>> {
        let ids = self.fetch_ids(query).await?;
        let papers = self.fetch_details(&ids).await?;

        tracing::info!(
            query = %query,
            ids = ids.len(),
            papers = papers.len(),
            with_industry_authors = papers.iter().filter(|p| p.has_non_academic_authors()).count(),
            "Search complete"
        );
        Ok(papers)
    }

    /// Make a GET request and return the body of a successful response.
    async fn get_xml(&self, url: &Url, params: Params) -> FetchResult<String> {
        tracing::debug!(url = %url, ?params, "GET");

        let params = self.with_identity(params);
        let response = self.client.get(url.clone()).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FetchError::remote(status.as_u16(), text));
        }

        Ok(response.text().await?)
    }

    /// Append the NCBI identification parameters.
    fn with_identity(&self, mut params: Params) -> Params {
        params.push(("tool", self.tool.clone()));
        if let Some(email) = &self.email {
            params.push(("email", email.clone()));
        }
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient")
            .field("esearch_url", &self.esearch_url.as_str())
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
