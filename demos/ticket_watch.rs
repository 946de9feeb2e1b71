//! Date-range fare search demo
//!
//! Searches fares for each day of a short window against the live search API
//! (requires `TAVILY_API_KEY`) and prints the cheapest priced quote.

use std::sync::Arc;
use wayfarer::fare;
use wayfarer::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer=info".into()),
        )
        .init();

    println!("=== Wayfarer Ticket Search Example ===\n");

    let client = Arc::new(TavilyClient::from_env()?);
    let search = TicketSearch::new(client)?.with_concurrency(3);

    let request = FareRequest::new(
        "Chile",
        "Brazil",
        "2025-03-01".parse()?,
        "2025-03-02".parse()?,
    );

    let quotes = search.search(&request).await?;
    let priced = fare::priced(&quotes);

    if priced.is_empty() {
        println!("No priced flights found from aggregator data.");
        return Ok(());
    }

    println!("Found {} flights with a price.", priced.len());
    if let Some(best) = fare::cheapest(&quotes) {
        println!(
            "Cheapest is {} - Link: {}\n",
            best.price.as_ref().expect("cheapest quote is priced"),
            best.link.as_deref().unwrap_or("no link"),
        );
    }

    for (i, quote) in priced.iter().enumerate() {
        println!(
            "Flight {}: Date={}, Price={}, Link={}",
            i + 1,
            quote.date,
            quote.price.as_ref().expect("filtered to priced quotes"),
            quote.link.as_deref().unwrap_or("no link"),
        );
    }

    Ok(())
}
