//! Offline price extraction demo
//!
//! Runs the extractor over canned aggregator snippets; no network or API key
//! needed.

use wayfarer::{ExtractorConfig, PriceExtractor};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer=debug".into()),
        )
        .init();

    println!("=== Wayfarer Fare Extraction Example ===\n");

    let snippets = [
        "Round trip flights from Santiago start at USD 512 on major airlines.",
        "Book your flight today - fares from $1,234.50 including taxes.",
        "Checked baggage fee $45 per bag applies on this flight.",
        "Great weather in March, pack light layers.",
        "Limited offer: AED 5,755 business class fare to Tokyo.",
        "Seats from usd 999, flight time 11 hours.",
    ];

    let flights = PriceExtractor::flights()?;
    println!("-- flights profile --");
    for snippet in &snippets {
        match flights.extract(snippet) {
            Some(price) => println!("  {:>12}  <- {}", price.to_string(), snippet),
            None => println!("  {:>12}  <- {}", "(no price)", snippet),
        }
    }

    let hotels = PriceExtractor::new(ExtractorConfig::hotels())?;
    println!("\n-- hotels profile --");
    let hotel_snippets = [
        "4-star hotel room from USD 250 per night in Zurich.",
        "Resort fee of USD 40 is added to every hotel stay.",
    ];
    for snippet in &hotel_snippets {
        match hotels.extract(snippet) {
            Some(price) => println!("  {:>12}  <- {}", price.to_string(), snippet),
            None => println!("  {:>12}  <- {}", "(no price)", snippet),
        }
    }

    Ok(())
}
