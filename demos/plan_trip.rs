//! End-to-end trip planning demo with a scripted planner
//!
//! Runs the full Thought/Action/Observation loop against the live search API
//! (requires `TAVILY_API_KEY`); the planner side is scripted so no model
//! credentials are needed.

use std::sync::Arc;
use wayfarer::prelude::*;
use wayfarer::{ScriptedPlanner, TicketSearchTool, WebSearchTool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer=info".into()),
        )
        .init();

    println!("=== Wayfarer Trip Planning Example ===\n");

    let search = Arc::new(TavilyClient::from_env()?);
    println!("✓ Search client initialized");

    // A canned planner: look up the destination, pull fares, then answer.
    let planner = ScriptedPlanner::new([
        "Thought: I should look at the destination first.\n\
         Action: web_search: Top cities to visit in Brazil in March\n\
         PAUSE",
        "Thought: Now I need flight prices for the travel window.\n\
         Action: ticket_search: fares for the requested trip\n\
         PAUSE",
        "Answer: Fly into São Paulo and pick the cheapest listed fare; \
         spend the first week there before heading up the coast.",
    ]);

    let agent = TravelAgent::builder()
        .name("Trip Planner")
        .planner(Arc::new(planner))
        .tool(Arc::new(WebSearchTool::new(search.clone())))
        .tool(Arc::new(TicketSearchTool::new(TicketSearch::new(search)?)))
        .max_turns(6)
        .build()?;

    println!("✓ Agent '{}' created (ID: {})", agent.name, agent.id);

    let request = FareRequest::new(
        "chile",
        "brazil",
        "2025-03-01".parse()?,
        "2025-03-03".parse()?,
    );
    let ctx = ToolContext::new(TripId::new()).with_fare_request(&request)?;

    let input = "I want an itinerary for a trip from chile to brazil starting March 1 to March 3.";
    println!("\n Input: {}\n", input);

    match agent.run(input, &ctx).await {
        Ok(outcome) => {
            println!("✅ Planning finished!\n");
            println!("📤 Answer: {}\n", outcome.answer);
            println!("🔍 Trace:");
            println!("{}", outcome.trace.format());
            println!("📊 Turns taken: {}", outcome.trace.turn_count());
        }
        Err(e) => {
            eprintln!("❌ Planning failed: {}", e);
        }
    }

    Ok(())
}
