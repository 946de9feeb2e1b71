//! # Wayfarer
//!
//! A travel fare search harness built with Rust.
//!
//! Wayfarer drives a trip-planning model through the Thought → Action →
//! Observation loop, answers its `web_search` and `ticket_search` actions
//! against a live travel-site search API, and turns unstructured
//! aggregator snippets into priced fare quotes.
//!
//! ## Features
//!
//! - **ReAct loop**: `Action: <tool>: <details>` lines are parsed out of
//!   planner turns and answered with observations until a final answer
//! - **Price extraction**: currency-whitelist matching with keyword-window
//!   filtering rejects fees and promos and keeps real fares
//! - **Date-range fare search**: one query per travel day through a bounded
//!   concurrent fan-out, structured flight data preferred over snippets
//! - **Pluggable seams**: bring your own model behind [`Planner`] and your
//!   own search backend behind [`SearchProvider`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wayfarer::{
//!     FareRequest, ScriptedPlanner, TavilyClient, TicketSearch, TicketSearchTool,
//!     ToolContext, TravelAgent, TripId, WebSearchTool,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = Arc::new(TavilyClient::from_env()?);
//!
//!     let agent = TravelAgent::builder()
//!         .name("Trip Planner")
//!         .planner(Arc::new(ScriptedPlanner::new([
//!             "Action: ticket_search: fares for the trip\nPAUSE",
//!             "Answer: Take the cheapest listed fare.",
//!         ])))
//!         .tool(Arc::new(WebSearchTool::new(search.clone())))
//!         .tool(Arc::new(TicketSearchTool::new(TicketSearch::new(search)?)))
//!         .build()?;
//!
//!     let request = FareRequest::new(
//!         "chile",
//!         "brazil",
//!         "2025-03-01".parse()?,
//!         "2025-03-02".parse()?,
//!     );
//!     let ctx = ToolContext::new(TripId::new()).with_fare_request(&request)?;
//!
//!     let outcome = agent.run("Plan a trip from chile to brazil.", &ctx).await?;
//!     println!("{}", outcome.answer);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent;
pub mod config;
pub mod error;
pub mod extract;
pub mod fare;
pub mod planner;
pub mod search;
pub mod ticket;
pub mod tools;
pub mod transcript;
pub mod types;

// Re-exports for convenience
pub use agent::{TravelAgent, TravelAgentBuilder, TripOutcome};
pub use config::{SearchConfig, SearchDepth};
pub use error::{Error, Result};
pub use extract::{ExtractorConfig, PriceExtractor};
pub use fare::{Currency, FareQuote, FareRequest, Price, SegmentDetail};
pub use planner::{Planner, ScriptedPlanner};
pub use search::{SearchHit, SearchProvider, SearchResponse, TavilyClient};
pub use ticket::TicketSearch;
pub use tools::{TicketSearchTool, Tool, ToolContext, ToolOutput, WebSearchTool};
pub use transcript::{ActionRequest, ModelTurn, Observation, Thought, TripTrace};
pub use types::{SearchId, TripId};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agent::{TravelAgent, TripOutcome};
    pub use crate::error::{Error, Result};
    pub use crate::extract::PriceExtractor;
    pub use crate::fare::{FareQuote, FareRequest, Price};
    pub use crate::planner::Planner;
    pub use crate::search::{SearchProvider, TavilyClient};
    pub use crate::ticket::TicketSearch;
    pub use crate::tools::{Tool, ToolContext};
    pub use crate::types::*;
}
