//! Web search provider seam and the Tavily wire client
//!
//! Results are normalized into provider-agnostic types so the extraction and
//! tool layers never see a vendor response shape.

use crate::config::{SearchConfig, SearchDepth};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single aggregator hit: title, link, and the content snippet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result title
    #[serde(default)]
    pub title: String,
    /// Source link
    pub url: String,
    /// Content snippet
    pub content: String,
}

/// One stop of a structured flight segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportStop {
    /// Airport name
    pub name: String,
    /// Local time at this stop
    pub time: String,
}

/// One leg of a structured flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSegment {
    /// Departure airport and time
    pub departure_airport: AirportStop,
    /// Arrival airport and time
    pub arrival_airport: AirportStop,
    /// Operating airline
    pub airline: String,
}

/// Structured flight data some feeds return alongside ordinary hits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredFlight {
    /// Total price for the flight; the feed states no currency
    pub price: f64,
    /// Individual legs
    #[serde(default)]
    pub flights: Vec<FlightSegment>,
}

/// Aggregated search response, normalized across providers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// A pre-built answer, when the provider returns one
    pub answer: Option<String>,
    /// Individual search hits
    pub hits: Vec<SearchHit>,
    /// Structured flight data; usually empty
    pub flights: Vec<StructuredFlight>,
}

/// Abstraction over web search backends
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one query, optionally restricted to a domain whitelist.
    ///
    /// `None` leaves the query unrestricted; fare queries search the whole
    /// web while destination queries pin the configured travel sites.
    async fn search(
        &self,
        query: &str,
        include_domains: Option<&[String]>,
    ) -> Result<SearchResponse>;

    /// The provider name, for logs
    fn provider_name(&self) -> &str;
}

/// Tavily search API client
pub struct TavilyClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: SearchConfig,
}

impl TavilyClient {
    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = SearchConfig::from_env()?;
        Self::new(config)
    }

    /// Create a new client with the given configuration
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(
        &self,
        query: &str,
        include_domains: Option<&[String]>,
    ) -> Result<SearchResponse> {
        let url = format!("{}/search", self.config.base_url.as_str().trim_end_matches('/'));

        let request = TavilyRequest {
            api_key: self.config.api_key(),
            query,
            search_depth: self.config.search_depth,
            max_results: self.config.max_results,
            include_domains,
            include_answer: self.config.include_answer,
        };

        debug!(query, "sending search request");

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::search(format!(
                "Request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: TavilyResponse = response.json().await?;
        debug!(hits = body.results.len(), "search response received");

        Ok(SearchResponse {
            answer: body.answer.filter(|a| !a.is_empty()),
            hits: body
                .results
                .into_iter()
                .map(|r| SearchHit {
                    title: r.title,
                    url: r.url,
                    content: r.content,
                })
                .collect(),
            flights: body.best_flights,
        })
    }

    fn provider_name(&self) -> &str {
        "tavily"
    }
}

/// Search request wire format
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_domains: Option<&'a [String]>,
    include_answer: bool,
}

/// Search response wire format
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilyResult>,
    #[serde(default)]
    best_flights: Vec<StructuredFlight>,
}

/// One result in the response wire format
#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    url: String,
    content: String,
}
