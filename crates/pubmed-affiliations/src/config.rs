//! Configuration for the PubMed affiliation fetcher.

/// E-utilities configuration constants.
pub mod api {
    /// Base URL for NCBI E-utilities.
    pub const BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Search endpoint, relative to the base URL.
    pub const ESEARCH: &str = "esearch.fcgi";

    /// Fetch endpoint, relative to the base URL.
    pub const EFETCH: &str = "efetch.fcgi";

    /// Database queried by both endpoints.
    pub const DATABASE: &str = "pubmed";

    /// Default cap on ids returned by a search.
    pub const DEFAULT_MAX_RESULTS: u32 = 100;

    /// Largest `retmax` sent with a single esearch call.
    pub const MAX_RETMAX: u32 = 100;

    /// Tool name reported to NCBI.
    pub const TOOL: &str = env!("CARGO_PKG_NAME");
}

/// Affiliation keywords that mark an author as academic.
pub mod keywords {
    /// Default academic keywords, matched case-insensitively as substrings.
    pub const ACADEMIC: &[&str] = &["university", "college", "institute", "laboratory", "hospital"];
}

/// Fetcher configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// E-utilities base URL (overridable for mock servers).
    pub base_url: String,

    /// Maximum number of ids requested from esearch.
    pub max_results: u32,

    /// Keywords that classify an affiliation as academic.
    pub academic_keywords: Vec<String>,

    /// NCBI API key (optional, raises the NCBI rate limit).
    pub api_key: Option<String>,

    /// Tool name sent with each request.
    pub tool: String,

    /// Contact email sent with each request (optional).
    pub email: Option<String>,
}

impl Config {
    /// Create a new configuration with optional NCBI credentials.
    #[must_use]
    pub fn new(api_key: Option<String>, email: Option<String>) -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            max_results: api::DEFAULT_MAX_RESULTS,
            academic_keywords: keywords::ACADEMIC.iter().map(ToString::to_string).collect(),
            api_key,
            tool: api::TOOL.to_string(),
            email,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self { base_url: base_url.to_string(), ..Self::default() }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `NCBI_API_KEY`, `NCBI_EMAIL`, `PUBMED_BASE_URL` and `PUBMED_MAX_RESULTS`,
    /// loading a `.env` file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns error if `PUBMED_MAX_RESULTS` is not a number.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let api_key = std::env::var("NCBI_API_KEY").ok();
        let email = std::env::var("NCBI_EMAIL").ok();
        let mut config = Self::new(api_key, email);

        if let Ok(base_url) = std::env::var("PUBMED_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(max) = std::env::var("PUBMED_MAX_RESULTS") {
            config.max_results = max.parse()?;
        }

        Ok(config)
    }

    /// Replace the academic keyword list.
    #[must_use]
    pub fn with_academic_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.academic_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the esearch result cap.
    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}
