//! Ticket search over a travel date range
//!
//! For each day of the requested window one fare query goes to the search
//! provider. Structured flight data is used when the feed returns it; when it
//! does not, the price extractor runs over every aggregator snippet instead.
//! Per-date queries fan out through a bounded buffer and results come back in
//! date order.

use crate::error::{Error, Result};
use crate::extract::{ExtractorConfig, PriceExtractor};
use crate::fare::{Currency, FareQuote, FareRequest, Price, SegmentDetail};
use crate::search::{SearchHit, SearchProvider, StructuredFlight};
use crate::types::SearchId;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_CONCURRENCY: usize = 4;

/// Fare search service over a date range
pub struct TicketSearch {
    provider: Arc<dyn SearchProvider>,
    extractor: PriceExtractor,
    concurrency: usize,
}

impl TicketSearch {
    /// Create a ticket search with the default flight extraction profile
    pub fn new(provider: Arc<dyn SearchProvider>) -> Result<Self> {
        Ok(Self {
            provider,
            extractor: PriceExtractor::new(ExtractorConfig::flights())?,
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    /// Replace the price extractor
    pub fn with_extractor(mut self, extractor: PriceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set the bound on concurrent per-date queries (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Every day of the window, inclusive on both ends.
    ///
    /// An inverted window is a caller error, not an empty result.
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
        if end < start {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(start.iter_days().take_while(|d| *d <= end).collect())
    }

    /// Query text for one travel day
    fn build_query(request: &FareRequest, date: NaiveDate) -> String {
        format!(
            "Flights from {} to {} departing on {} and returning on {}",
            request.origin, request.destination, date, date
        )
    }

    /// Search fares for every day of the request window.
    ///
    /// A day whose query fails is logged and skipped; the remaining days
    /// still produce quotes.
    pub async fn search(&self, request: &FareRequest) -> Result<Vec<FareQuote>> {
        let dates = Self::date_range(request.start, request.end)?;
        info!(
            origin = %request.origin,
            destination = %request.destination,
            days = dates.len(),
            "starting fare search"
        );

        let per_day: Vec<Vec<FareQuote>> = stream::iter(dates)
            .map(|date| self.search_one_day(request, date))
            .buffered(self.concurrency)
            .collect()
            .await;

        Ok(per_day.into_iter().flatten().collect())
    }

    /// Fetch and parse fares for one travel day
    async fn search_one_day(&self, request: &FareRequest, date: NaiveDate) -> Vec<FareQuote> {
        let search_id = SearchId::new();
        let query = Self::build_query(request, date);
        debug!(%search_id, %date, query, "searching fares for day");

        let response = match self.provider.search(&query, None).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%search_id, %date, error = %e, "no response for this day, skipping");
                return Vec::new();
            }
        };

        if !response.flights.is_empty() {
            debug!(%date, "structured flight data found");
            return structured_quotes(request, date, &response.flights);
        }

        debug!(
            %date,
            hits = response.hits.len(),
            "no structured flight data, parsing aggregator results"
        );
        self.parse_aggregator(request, date, &response.hits)
    }

    /// Run the extractor over aggregator hits.
    ///
    /// Every hit yields a quote so callers can see how many results were
    /// inspected; unpriced quotes are filtered at selection time.
    fn parse_aggregator(
        &self,
        request: &FareRequest,
        date: NaiveDate,
        hits: &[SearchHit],
    ) -> Vec<FareQuote> {
        hits.iter()
            .map(|hit| FareQuote {
                origin: request.origin.clone(),
                destination: request.destination.clone(),
                date,
                segment: SegmentDetail::default(),
                price: self.extractor.extract(&hit.content),
                link: Some(hit.url.clone()),
            })
            .collect()
    }
}

/// Map structured flight data to quotes, one per segment.
///
/// The feed states an amount but no currency, and carries no backing link.
fn structured_quotes(
    request: &FareRequest,
    date: NaiveDate,
    flights: &[StructuredFlight],
) -> Vec<FareQuote> {
    flights
        .iter()
        .flat_map(|flight| {
            flight.flights.iter().map(move |segment| FareQuote {
                origin: request.origin.clone(),
                destination: request.destination.clone(),
                date,
                segment: SegmentDetail {
                    departure_airport: Some(segment.departure_airport.name.clone()),
                    arrival_airport: Some(segment.arrival_airport.name.clone()),
                    departure_time: Some(segment.departure_airport.time.clone()),
                    arrival_time: Some(segment.arrival_airport.time.clone()),
                    airline: Some(segment.airline.clone()),
                },
                price: Some(Price::new(flight.price, Currency::Unspecified)),
                link: None,
            })
        })
        .collect()
}
