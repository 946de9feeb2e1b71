//! Flight fare records and selection helpers
//!
//! A [`FareQuote`] is a value record assembled from one search result. It has
//! no identity beyond its position in the list that produced it, and no
//! lifecycle beyond the call that returned it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency tag attached to an extracted price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Upper-cased code from the extractor whitelist (e.g. `USD`)
    Code(String),
    /// A literal `$` marker with no code attached
    Dollar,
    /// Structured flight feeds that do not state a currency
    Unspecified,
}

impl Currency {
    /// Create a normalized currency code tag
    pub fn code(code: impl AsRef<str>) -> Self {
        Self::Code(code.as_ref().trim().to_uppercase())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Dollar => write!(f, "$"),
            Self::Unspecified => write!(f, "N/A"),
        }
    }
}

/// A price together with its currency tag.
///
/// The pair is optional as a whole on [`FareQuote`]: a quote either carries a
/// confident amount and its currency, or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Numeric amount, thousands separators already stripped
    pub amount: f64,
    /// Currency tag the amount was quoted in
    pub currency: Currency,
}

impl Price {
    /// Create a new price
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Route and date window for a fare search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRequest {
    /// Where the trip starts
    pub origin: String,
    /// Where the trip goes
    pub destination: String,
    /// First travel day (inclusive)
    pub start: NaiveDate,
    /// Last travel day (inclusive)
    pub end: NaiveDate,
}

impl FareRequest {
    /// Create a new fare request
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            start,
            end,
        }
    }
}

/// Structured segment detail, present only when the aggregator returned
/// structured flight data rather than free-text snippets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDetail {
    /// Departure airport name
    pub departure_airport: Option<String>,
    /// Arrival airport name
    pub arrival_airport: Option<String>,
    /// Departure time as reported by the feed
    pub departure_time: Option<String>,
    /// Arrival time as reported by the feed
    pub arrival_time: Option<String>,
    /// Operating airline
    pub airline: Option<String>,
}

/// A single candidate fare assembled from one search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    /// Requested origin
    pub origin: String,
    /// Requested destination
    pub destination: String,
    /// Travel day this quote is for
    pub date: NaiveDate,
    /// Segment detail from structured feeds; empty on the aggregator path
    #[serde(default)]
    pub segment: SegmentDetail,
    /// Extracted price, or `None` when no confident match was found
    pub price: Option<Price>,
    /// Aggregator link backing this quote; structured data carries none
    pub link: Option<String>,
}

impl FareQuote {
    /// Whether this quote carries a confident price
    pub fn is_priced(&self) -> bool {
        self.price.is_some()
    }
}

/// Keep only quotes that carry a confident price
pub fn priced(quotes: &[FareQuote]) -> Vec<&FareQuote> {
    quotes.iter().filter(|q| q.is_priced()).collect()
}

/// The cheapest priced quote, if any quote is priced at all.
///
/// Amounts across currencies are compared as raw numbers, exactly as the
/// aggregator snippets report them.
pub fn cheapest(quotes: &[FareQuote]) -> Option<&FareQuote> {
    quotes
        .iter()
        .filter(|q| q.is_priced())
        .min_by(|a, b| {
            let pa = a.price.as_ref().map(|p| p.amount).unwrap_or(f64::MAX);
            let pb = b.price.as_ref().map(|p| p.amount).unwrap_or(f64::MAX);
            pa.total_cmp(&pb)
        })
}

/// Render priced quotes as the "Flight Options" observation text.
///
/// At most `limit` options are listed; links are reproduced verbatim so the
/// planner can repeat them without rewriting.
pub fn render_options(quotes: &[FareQuote], limit: usize) -> String {
    let mut text = String::from("Flight Options:\n");

    let valid = priced(quotes);
    if valid.is_empty() {
        text.push_str("No flight options found.\n");
        return text;
    }

    for (idx, quote) in valid.iter().take(limit).enumerate() {
        let price = quote
            .price
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_default();
        let link = quote.link.as_deref().unwrap_or("no link");
        text.push_str(&format!(
            "{}) {} -> {} on {}: {}, Link={}\n",
            idx + 1,
            quote.origin,
            quote.destination,
            quote.date,
            price,
            link,
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(date: &str, price: Option<Price>, link: Option<&str>) -> FareQuote {
        FareQuote {
            origin: "chile".to_string(),
            destination: "brazil".to_string(),
            date: date.parse().unwrap(),
            segment: SegmentDetail::default(),
            price,
            link: link.map(str::to_string),
        }
    }

    #[test]
    fn test_priced_filters_unpriced_quotes() {
        let quotes = vec![
            quote("2025-03-01", None, Some("https://a.example")),
            quote(
                "2025-03-02",
                Some(Price::new(512.0, Currency::code("usd"))),
                Some("https://b.example"),
            ),
        ];

        let valid = priced(&quotes);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].date, "2025-03-02".parse().unwrap());
    }

    #[test]
    fn test_cheapest_picks_lowest_amount() {
        let quotes = vec![
            quote("2025-03-01", Some(Price::new(900.0, Currency::Dollar)), None),
            quote("2025-03-02", Some(Price::new(512.5, Currency::Dollar)), None),
            quote("2025-03-03", None, None),
        ];

        let best = cheapest(&quotes).unwrap();
        assert_eq!(best.price.as_ref().unwrap().amount, 512.5);
    }

    #[test]
    fn test_cheapest_empty_when_nothing_priced() {
        let quotes = vec![quote("2025-03-01", None, None)];
        assert!(cheapest(&quotes).is_none());
    }

    #[test]
    fn test_currency_code_is_normalized() {
        assert_eq!(Currency::code(" usd "), Currency::Code("USD".to_string()));
        assert_eq!(Currency::code("usd").to_string(), "USD");
        assert_eq!(Currency::Dollar.to_string(), "$");
        assert_eq!(Currency::Unspecified.to_string(), "N/A");
    }

    #[test]
    fn test_render_options_lists_links_verbatim() {
        let quotes = vec![
            quote(
                "2025-03-01",
                Some(Price::new(755.0, Currency::code("AED"))),
                Some("https://www.skyscanner.ae/deal/1"),
            ),
            quote("2025-03-02", None, Some("https://ignored.example")),
        ];

        let text = render_options(&quotes, 5);
        assert!(text.starts_with("Flight Options:\n"));
        assert!(text.contains("1) chile -> brazil on 2025-03-01: 755 AED"));
        assert!(text.contains("Link=https://www.skyscanner.ae/deal/1"));
        assert!(!text.contains("ignored.example"));
    }

    #[test]
    fn test_render_options_respects_limit() {
        let quotes: Vec<FareQuote> = (1..=8)
            .map(|day| {
                quote(
                    &format!("2025-03-{:02}", day),
                    Some(Price::new(100.0 + day as f64, Currency::Dollar)),
                    None,
                )
            })
            .collect();

        let text = render_options(&quotes, 5);
        assert!(text.contains("5) "));
        assert!(!text.contains("6) "));
    }

    #[test]
    fn test_render_options_empty() {
        let text = render_options(&[], 5);
        assert!(text.contains("No flight options found."));
    }
}
