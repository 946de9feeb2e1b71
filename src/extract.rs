//! Aggregator price extraction
//!
//! Search-result snippets quote prices in free text ("Round trip from AED
//! 5,755", "flights from $199"), surrounded by noise that also looks like a
//! price: baggage fees, seat fees, promo discounts. The extractor matches a
//! whitelisted currency marker followed by an amount, then inspects a window
//! of surrounding text: any skip keyword rejects the match, and at least one
//! require keyword must be present for it to count as a real fare.
//!
//! Only the first match in a snippet is considered; a rejected first match
//! means the snippet yields no price.

use crate::error::{Error, Result};
use crate::fare::{Currency, Price};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

fn default_codes() -> Vec<String> {
    ["AED", "USD", "GBP", "EUR", "SAR"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_window() -> usize {
    80
}

fn default_skip() -> Vec<String> {
    ["discount", "service fee", "baggage", "seat fee"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

fn default_require() -> Vec<String> {
    ["flight", "fare"].iter().map(|k| k.to_string()).collect()
}

/// Heuristics governing price extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Currency codes accepted in addition to a literal `$`
    #[serde(default = "default_codes")]
    pub currency_codes: Vec<String>,
    /// Characters of context kept on each side of a match for keyword checks
    #[serde(default = "default_window")]
    pub context_window: usize,
    /// A match whose context mentions any of these is rejected
    #[serde(default = "default_skip")]
    pub skip_keywords: Vec<String>,
    /// A match whose context mentions none of these is rejected
    #[serde(default = "default_require")]
    pub require_keywords: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::flights()
    }
}

impl ExtractorConfig {
    /// Profile tuned for flight-fare snippets
    pub fn flights() -> Self {
        Self {
            currency_codes: default_codes(),
            context_window: default_window(),
            skip_keywords: default_skip(),
            require_keywords: default_require(),
        }
    }

    /// Profile tuned for hotel-deal snippets
    pub fn hotels() -> Self {
        Self {
            currency_codes: default_codes(),
            context_window: default_window(),
            skip_keywords: ["resort fee", "city tax", "parking", "deposit"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            require_keywords: ["hotel", "night", "room"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// Load a profile from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse extractor profile: {}", e)))
    }

    /// Load a profile from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }
}

/// Price extractor over free-form aggregator snippets
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    pattern: Regex,
    config: ExtractorConfig,
}

impl PriceExtractor {
    /// Compile the extractor for the given heuristics.
    ///
    /// Fails when the currency whitelist is empty.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        if config.currency_codes.is_empty() {
            return Err(Error::config("currency whitelist must not be empty"));
        }

        let codes = config
            .currency_codes
            .iter()
            .map(|c| regex::escape(c))
            .collect::<Vec<_>>()
            .join("|");

        // A whitelisted code (word-bounded) or a literal '$', then an amount
        // that may carry thousands separators and decimals.
        let pattern = Regex::new(&format!(
            r"(?i)(?:\b({codes})\b|\$)\s?(\d+(?:,\d+)*(?:\.\d+)?)"
        ))
        .map_err(|e| Error::config(format!("invalid currency pattern: {}", e)))?;

        Ok(Self { pattern, config })
    }

    /// Compile the default flight-fare extractor
    pub fn flights() -> Result<Self> {
        Self::new(ExtractorConfig::flights())
    }

    /// The heuristics this extractor was compiled with
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a price from one snippet.
    ///
    /// Returns `None` when no currency marker is found, when the amount does
    /// not parse, or when the surrounding context fails the keyword checks.
    pub fn extract(&self, content: &str) -> Option<Price> {
        let caps = self.pattern.captures(content)?;
        let matched = caps.get(0)?;

        let currency = match caps.get(1) {
            Some(code) => Currency::code(code.as_str()),
            None => Currency::Dollar,
        };

        let raw_amount = caps.get(2)?.as_str().replace(',', "");
        let amount: f64 = raw_amount.parse().ok()?;

        let snippet = self
            .context(content, matched.start(), matched.end())
            .to_lowercase();

        if let Some(kw) = self
            .config
            .skip_keywords
            .iter()
            .find(|kw| snippet.contains(&kw.to_lowercase()))
        {
            debug!(keyword = %kw, "skipping price match near a disqualifying keyword");
            return None;
        }

        if !self
            .config
            .require_keywords
            .iter()
            .any(|kw| snippet.contains(&kw.to_lowercase()))
        {
            debug!("skipping price match with no qualifying keyword in context");
            return None;
        }

        debug!(%amount, %currency, "accepted price match");
        Some(Price::new(amount, currency))
    }

    /// Window of text around a match, clamped to char boundaries.
    fn context<'a>(&self, content: &'a str, start: usize, end: usize) -> &'a str {
        let lo = clamp_boundary(content, start.saturating_sub(self.config.context_window));
        let hi = clamp_boundary(
            content,
            end.saturating_add(self.config.context_window).min(content.len()),
        );
        &content[lo..hi]
    }
}

/// Largest char boundary at or below `idx`
fn clamp_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PriceExtractor {
        PriceExtractor::flights().unwrap()
    }

    #[test]
    fn test_dollar_price_with_flight_context() {
        let price = extractor()
            .extract("Book this flight today for $1,234.50 round trip")
            .unwrap();
        assert_eq!(price.amount, 1234.50);
        assert_eq!(price.currency, Currency::Dollar);
    }

    #[test]
    fn test_iso_code_is_upper_cased() {
        let price = extractor()
            .extract("Best fare found: usd 999 per person")
            .unwrap();
        assert_eq!(price.amount, 999.0);
        assert_eq!(price.currency, Currency::code("USD"));
    }

    #[test]
    fn test_baggage_fee_is_rejected() {
        assert!(extractor()
            .extract("Each flight charges a baggage fee of $50 per bag")
            .is_none());
    }

    #[test]
    fn test_discount_is_rejected() {
        assert!(extractor()
            .extract("Flight deals with a $120 discount this week only")
            .is_none());
    }

    #[test]
    fn test_missing_qualifying_word_is_rejected() {
        assert!(extractor()
            .extract("Souvenir mugs from $12 at the airport shop")
            .is_none());
    }

    #[test]
    fn test_no_currency_marker_yields_none() {
        assert!(extractor()
            .extract("Flights sell out fast in March, book early")
            .is_none());
    }

    #[test]
    fn test_first_match_only() {
        // The first match fails the keyword check; the later clean match is
        // never considered.
        let text = format!(
            "Gift shop mugs from $12. {} flight fare $400 today.",
            "x".repeat(100)
        );
        assert!(extractor().extract(&text).is_none());
    }

    #[test]
    fn test_thousands_separators_are_stripped() {
        let price = extractor()
            .extract("AED 5,755 one-way flight from Abu Dhabi")
            .unwrap();
        assert_eq!(price.amount, 5755.0);
        assert_eq!(price.currency, Currency::code("AED"));
    }

    #[test]
    fn test_keyword_outside_window_does_not_rescue_match() {
        let padding = "x".repeat(120);
        let text = format!("flight {} $250 deal of the day", padding);
        // "flight" sits more than a window away from the match.
        assert!(extractor().extract(&text).is_none());
    }

    #[test]
    fn test_window_clamps_on_multibyte_text() {
        // The window edge lands mid-glyph in the emoji run; slicing must
        // still land on a char boundary.
        let text = format!("{} flight fare $320 {}", "✈".repeat(40), "✈".repeat(40));
        let price = extractor().extract(&text).unwrap();
        assert_eq!(price.amount, 320.0);
    }

    #[test]
    fn test_window_clips_at_text_edges() {
        let price = extractor().extract("$88 flight").unwrap();
        assert_eq!(price.amount, 88.0);
    }

    #[test]
    fn test_hotels_profile() {
        let hotels = PriceExtractor::new(ExtractorConfig::hotels()).unwrap();
        let price = hotels.extract("4-star hotel room from USD 250 per night").unwrap();
        assert_eq!(price.amount, 250.0);
        assert!(hotels
            .extract("resort fee of USD 40 added at the hotel desk")
            .is_none());
        // Flight wording does not qualify under the hotel profile.
        assert!(hotels.extract("flight fare USD 300").is_none());
    }

    #[test]
    fn test_empty_whitelist_fails_construction() {
        let config = ExtractorConfig {
            currency_codes: vec![],
            ..ExtractorConfig::flights()
        };
        assert!(PriceExtractor::new(config).is_err());
    }

    #[test]
    fn test_profile_from_yaml() {
        let yaml = r#"
currency_codes: ["CHF"]
require_keywords: ["train"]
"#;
        let config = ExtractorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.currency_codes, vec!["CHF".to_string()]);
        assert_eq!(config.context_window, 80);
        assert_eq!(config.skip_keywords, ExtractorConfig::flights().skip_keywords);

        let extractor = PriceExtractor::new(config).unwrap();
        let price = extractor.extract("Scenic train tickets at CHF 89").unwrap();
        assert_eq!(price.amount, 89.0);
        assert_eq!(price.currency, Currency::code("CHF"));
    }

    #[test]
    fn test_profile_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "context_window: 20").unwrap();

        let config = ExtractorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.context_window, 20);
        assert_eq!(config.currency_codes, ExtractorConfig::flights().currency_codes);
    }
}
