//! Tool trait and the built-in travel tools
//!
//! ReAct actions carry free-text details, so tools take a plain string input
//! plus a context holding request data the planner never sees (route and
//! dates come from the caller, not from the model).

use crate::config::domains;
use crate::error::Result;
use crate::fare::{self, FareRequest};
use crate::search::{SearchProvider, SearchResponse};
use crate::ticket::TicketSearch;
use crate::types::TripId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Context key under which the fare request is stored
pub const FARE_REQUEST_KEY: &str = "fare_request";

/// Context provided to tools during execution
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// ID of the trip being planned
    pub trip_id: TripId,
    /// Additional context data
    pub data: HashMap<String, Value>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(trip_id: TripId) -> Self {
        Self {
            trip_id,
            data: HashMap::new(),
        }
    }

    /// Add data to the context
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Attach the fare request the ticket search tool will serve
    pub fn with_fare_request(self, request: &FareRequest) -> Result<Self> {
        let value = serde_json::to_value(request)?;
        Ok(self.with_data(FARE_REQUEST_KEY, value))
    }

    /// Get data from the context
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The fare request attached to this context, if any
    pub fn fare_request(&self) -> Option<FareRequest> {
        self.data
            .get(FARE_REQUEST_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Output from a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the tool execution was successful
    pub success: bool,
    /// Output content
    pub content: String,
    /// Optional structured data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Optional error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutput {
    /// Create a successful tool output
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            data: None,
            error: None,
        }
    }

    /// Create a successful tool output with data
    pub fn success_with_data(content: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            content: content.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed tool output
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Tool trait defining the actions a planner may request
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique identifier, matched against the `Action:` line
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// What the tool does
    fn description(&self) -> &str;

    /// Execute the tool with the free-text details from the action line
    async fn execute(&self, input: &str, ctx: &ToolContext) -> Result<ToolOutput>;
}

/// Web search over the configured travel sites
pub struct WebSearchTool {
    provider: Arc<dyn SearchProvider>,
    include_domains: Vec<String>,
}

impl WebSearchTool {
    /// Create a web search tool restricted to the default aggregator sites
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            include_domains: domains::aggregators(),
        }
    }

    /// Override the domain whitelist
    pub fn with_domains(mut self, include_domains: Vec<String>) -> Self {
        self.include_domains = include_domains;
        self
    }

    /// Join hit snippets into observation text, the provider answer first
    fn format_response(response: &SearchResponse) -> String {
        let snippets: Vec<&str> = response
            .hits
            .iter()
            .map(|hit| hit.content.as_str())
            .collect();

        match &response.answer {
            Some(answer) if snippets.is_empty() => answer.clone(),
            Some(answer) => format!("{} {}", answer, snippets.join(" ")),
            None if snippets.is_empty() => "No results found.".to_string(),
            None => snippets.join(" "),
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn id(&self) -> &str {
        "web_search"
    }

    fn name(&self) -> &str {
        "Web Search"
    }

    fn description(&self) -> &str {
        "Searches travel sites for destination, flight and hotel information"
    }

    async fn execute(&self, input: &str, _ctx: &ToolContext) -> Result<ToolOutput> {
        let query = input.trim();
        if query.is_empty() {
            return Ok(ToolOutput::failure("empty search query"));
        }

        // API failures become failed outputs so the loop can report them to
        // the planner instead of aborting the trip.
        match self.provider.search(query, Some(&self.include_domains)).await {
            Ok(response) => Ok(ToolOutput::success(Self::format_response(&response))),
            Err(e) => {
                warn!(error = %e, "web search failed");
                Ok(ToolOutput::failure(format!("web search failed: {}", e)))
            }
        }
    }
}

/// Fare search over the trip's date window
pub struct TicketSearchTool {
    search: TicketSearch,
    limit: usize,
}

impl TicketSearchTool {
    /// Create a ticket search tool listing at most five options
    pub fn new(search: TicketSearch) -> Self {
        Self { search, limit: 5 }
    }

    /// Set the maximum number of options listed in the observation
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[async_trait]
impl Tool for TicketSearchTool {
    fn id(&self) -> &str {
        "ticket_search"
    }

    fn name(&self) -> &str {
        "Ticket Search"
    }

    fn description(&self) -> &str {
        "Searches flight fares for every day of the requested travel window"
    }

    async fn execute(&self, _input: &str, ctx: &ToolContext) -> Result<ToolOutput> {
        // The route and dates come from the caller's context, not from the
        // planner's free text.
        let Some(request) = ctx.fare_request() else {
            return Ok(ToolOutput::failure(
                "no fare request attached to this trip",
            ));
        };

        let quotes = self.search.search(&request).await?;
        let text = fare::render_options(&quotes, self.limit);

        Ok(ToolOutput::success_with_data(
            text,
            serde_json::to_value(&quotes)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::search::SearchHit;

    struct StubProvider {
        response: Result<SearchResponse>,
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        async fn search(
            &self,
            _query: &str,
            _include_domains: Option<&[String]>,
        ) -> Result<SearchResponse> {
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(_) => Err(Error::search("stubbed failure")),
            }
        }

        fn provider_name(&self) -> &str {
            "stub"
        }
    }

    fn hits_response() -> SearchResponse {
        SearchResponse {
            answer: Some("Fares start near $500.".to_string()),
            hits: vec![
                SearchHit {
                    title: "A".to_string(),
                    url: "https://a.example".to_string(),
                    content: "flight fare $512".to_string(),
                },
                SearchHit {
                    title: "B".to_string(),
                    url: "https://b.example".to_string(),
                    content: "great views".to_string(),
                },
            ],
            flights: vec![],
        }
    }

    #[test]
    fn test_fare_request_roundtrip() {
        let request = FareRequest::new(
            "chile",
            "brazil",
            "2025-03-01".parse().unwrap(),
            "2025-03-23".parse().unwrap(),
        );
        let ctx = ToolContext::new(TripId::new())
            .with_fare_request(&request)
            .unwrap();

        assert_eq!(ctx.fare_request(), Some(request));
        assert!(ctx.get(FARE_REQUEST_KEY).is_some());
    }

    #[test]
    fn test_fare_request_absent() {
        let ctx = ToolContext::new(TripId::new());
        assert!(ctx.fare_request().is_none());
    }

    #[tokio::test]
    async fn test_web_search_formats_answer_and_snippets() {
        let tool = WebSearchTool::new(Arc::new(StubProvider {
            response: Ok(hits_response()),
        }));
        let ctx = ToolContext::new(TripId::new());

        let output = tool.execute("flights to brazil", &ctx).await.unwrap();
        assert!(output.success);
        assert!(output.content.starts_with("Fares start near $500."));
        assert!(output.content.contains("flight fare $512"));
        assert!(output.content.contains("great views"));
    }

    #[tokio::test]
    async fn test_web_search_empty_query_fails() {
        let tool = WebSearchTool::new(Arc::new(StubProvider {
            response: Ok(SearchResponse::default()),
        }));
        let ctx = ToolContext::new(TripId::new());

        let output = tool.execute("   ", &ctx).await.unwrap();
        assert!(!output.success);
    }

    #[tokio::test]
    async fn test_web_search_api_failure_becomes_failed_output() {
        let tool = WebSearchTool::new(Arc::new(StubProvider {
            response: Err(Error::search("down")),
        }));
        let ctx = ToolContext::new(TripId::new());

        let output = tool.execute("flights", &ctx).await.unwrap();
        assert!(!output.success);
        assert!(output.error.unwrap().contains("web search failed"));
    }

    #[tokio::test]
    async fn test_ticket_search_without_request_fails_gracefully() {
        let search = TicketSearch::new(Arc::new(StubProvider {
            response: Ok(SearchResponse::default()),
        }))
        .unwrap();
        let tool = TicketSearchTool::new(search);
        let ctx = ToolContext::new(TripId::new());

        let output = tool.execute("", &ctx).await.unwrap();
        assert!(!output.success);
        assert!(output.error.unwrap().contains("no fare request"));
    }

    #[tokio::test]
    async fn test_ticket_search_renders_options_with_data() {
        let search = TicketSearch::new(Arc::new(StubProvider {
            response: Ok(SearchResponse {
                answer: None,
                hits: vec![SearchHit {
                    title: String::new(),
                    url: "https://a.example".to_string(),
                    content: "round trip flight fare USD 512".to_string(),
                }],
                flights: vec![],
            }),
        }))
        .unwrap();
        let tool = TicketSearchTool::new(search);

        let request = FareRequest::new(
            "chile",
            "brazil",
            "2025-03-01".parse().unwrap(),
            "2025-03-01".parse().unwrap(),
        );
        let ctx = ToolContext::new(TripId::new())
            .with_fare_request(&request)
            .unwrap();

        let output = tool.execute("", &ctx).await.unwrap();
        assert!(output.success);
        assert!(output.content.contains("Flight Options:"));
        assert!(output.content.contains("512 USD"));
        assert!(output.data.is_some());
    }
}
