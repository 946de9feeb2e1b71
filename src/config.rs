//! Configuration types for the wayfarer harness

use crate::error::{Error, Result};
use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Search depth requested from the aggregator API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDepth {
    /// Cheap, fast lookups
    Basic,
    /// Deeper crawl of each hit
    Advanced,
}

/// Search API client configuration
#[derive(Clone)]
pub struct SearchConfig {
    /// API key (loaded from environment variable)
    pub api_key: SecretString,
    /// Base URL for the search API
    pub base_url: Url,
    /// Search depth for each query
    pub search_depth: SearchDepth,
    /// Maximum results per query
    pub max_results: u32,
    /// Domains every query is restricted to by default
    pub include_domains: Vec<String>,
    /// Whether the provider should also return a synthesized answer
    pub include_answer: bool,
    /// Upper bound on concurrent per-date fare queries
    pub max_concurrency: usize,
    /// Request timeout
    pub timeout: Duration,
}

impl SearchConfig {
    /// Create a new search configuration from environment
    pub fn from_env() -> Result<Self> {
        // Load .env if present so local development picks up TAVILY_API_KEY
        let _ = dotenv();

        let api_key = std::env::var("TAVILY_API_KEY")
            .map_err(|_| Error::config("TAVILY_API_KEY environment variable not set"))?;

        Ok(Self::new(api_key))
    }

    /// Create a new search configuration with a specific API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: Url::parse("https://api.tavily.com").expect("valid search API URL"),
            search_depth: SearchDepth::Basic,
            max_results: 5,
            include_domains: domains::aggregators(),
            include_answer: false,
            max_concurrency: 4,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the search depth
    pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self
    }

    /// Set the maximum results per query
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the default domain whitelist
    pub fn with_include_domains(mut self, domains: Vec<String>) -> Self {
        self.include_domains = domains;
        self
    }

    /// Ask the provider for a synthesized answer alongside the hits
    pub fn with_include_answer(mut self, include_answer: bool) -> Self {
        self.include_answer = include_answer;
        self
    }

    /// Set the bound on concurrent per-date fare queries (minimum 1)
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the API key as a string
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"***REDACTED***")
            .field("base_url", &self.base_url)
            .field("search_depth", &self.search_depth)
            .field("max_results", &self.max_results)
            .field("include_domains", &self.include_domains)
            .field("include_answer", &self.include_answer)
            .field("max_concurrency", &self.max_concurrency)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Travel sites queries are restricted to by default
pub mod domains {
    /// Flight and package aggregator
    pub const EXPEDIA: &str = "https://www.expedia.ae/";

    /// Flight fare aggregator
    pub const SKYSCANNER: &str = "https://www.skyscanner.ae/";

    /// Carrier fares
    pub const ETIHAD: &str = "https://www.etihad.com/en-ae/";

    /// Hotel deals
    pub const BOOKING: &str = "https://www.booking.com/";

    /// Hotel and activity reviews
    pub const TRIPADVISOR: &str = "https://www.tripadvisor.com/";

    /// Hotel deals
    pub const HOTELS: &str = "https://www.hotels.com/";

    /// Flight and hotel metasearch
    pub const KAYAK: &str = "https://www.kayak.com/";

    /// Default whitelist for flight and itinerary queries
    pub fn aggregators() -> Vec<String> {
        vec![
            EXPEDIA.to_string(),
            SKYSCANNER.to_string(),
            ETIHAD.to_string(),
            BOOKING.to_string(),
        ]
    }

    /// Whitelist for hotel-deal queries
    pub fn lodging() -> Vec<String> {
        vec![
            BOOKING.to_string(),
            TRIPADVISOR.to_string(),
            HOTELS.to_string(),
            KAYAK.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::new("test-key")
            .with_max_results(2)
            .with_search_depth(SearchDepth::Advanced)
            .with_max_concurrency(0);

        assert_eq!(config.api_key(), "test-key");
        assert_eq!(config.max_results, 2);
        assert_eq!(config.search_depth, SearchDepth::Advanced);
        // Concurrency is clamped so the fan-out buffer is never empty.
        assert_eq!(config.max_concurrency, 1);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = SearchConfig::new("super-secret");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("***REDACTED***"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_default_domains_are_aggregators() {
        let config = SearchConfig::new("k");
        assert_eq!(config.include_domains, domains::aggregators());
        assert!(config.include_domains.iter().any(|d| d.contains("skyscanner")));
    }
}
