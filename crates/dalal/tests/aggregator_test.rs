//! Acquisition and board refresh against in-memory sources.

use async_trait::async_trait;
use dalal::data::fallback::seeds;
use dalal::data::{
    AlphaVantageConfig, AlphaVantageSource, DataError, Exchange, QuoteSource, RawQuote,
    Result as DataResult,
};
use dalal::screen::{ScreeningCriteria, screen};
use dalal::{
    AggregatorConfig, ConnectivityStatus, IndianUniverse, MarketBoard, QuoteAggregator,
    QuoteOrigin,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Serves fixed prices; any other ticker fails.
struct FakeSource {
    name: &'static str,
    prices: HashMap<String, f64>,
    delays_ms: HashMap<String, u64>,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(name: &'static str, prices: &[(&str, f64)]) -> Self {
        Self {
            name,
            prices: prices.iter().map(|(s, p)| (s.to_string(), *p)).collect(),
            delays_ms: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn empty(name: &'static str) -> Self {
        Self::new(name, &[])
    }

    fn with_delay(mut self, symbol: &str, ms: u64) -> Self {
        self.delays_ms.insert(symbol.to_string(), ms);
        self
    }
}

#[async_trait]
impl QuoteSource for FakeSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn query(&self, raw_symbol: &str) -> DataResult<RawQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ms) = self.delays_ms.get(raw_symbol) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        match self.prices.get(raw_symbol) {
            Some(price) => Ok(RawQuote {
                regular_market_price: Some(*price),
                previous_close: Some(*price),
                volume: Some(5_000),
                ..RawQuote::new(raw_symbol)
            }),
            None => Err(DataError::missing(raw_symbol, "not listed")),
        }
    }
}

fn seeded_config() -> AggregatorConfig {
    AggregatorConfig {
        concurrency: None,
        seed: Some(42),
    }
}

fn symbols(quotes: &[dalal::data::Quote]) -> Vec<&str> {
    quotes.iter().map(|q| q.symbol.as_str()).collect()
}

#[tokio::test]
async fn test_fallback_when_every_source_is_empty() {
    let aggregator = QuoteAggregator::builder()
        .source(FakeSource::empty("primary"))
        .source(AlphaVantageSource::new(AlphaVantageConfig::default()).unwrap())
        .config(seeded_config())
        .build()
        .unwrap();

    let universe = IndianUniverse::new();
    let acquisition = aggregator.acquire(universe.tickers()).await;

    assert_eq!(acquisition.origin, QuoteOrigin::Fallback);
    assert_eq!(acquisition.status(), ConnectivityStatus::Disconnected);
    assert_eq!(acquisition.quotes.len(), 6);

    for (quote, seed) in acquisition.quotes.iter().zip(seeds(acquisition.fetched_at)) {
        assert_eq!(quote.symbol, seed.quote.symbol);
        assert!((quote.price - seed.quote.price).abs() <= seed.jitter_band / 2.0);
        assert_eq!(quote.last_updated, acquisition.fetched_at);
        assert!(quote.is_valid());
    }
}

#[tokio::test]
async fn test_no_sources_serves_fallback() {
    let aggregator = QuoteAggregator::builder()
        .config(seeded_config())
        .build()
        .unwrap();

    let quotes = aggregator.fetch_quotes(&["TCS.NS"]).await;
    assert_eq!(
        symbols(&quotes),
        vec!["TCS", "PAGEIND", "DELTACORP", "RAJESHEXPO", "HDFCBANK", "ICICIBANK"]
    );
}

#[tokio::test]
async fn test_partial_failure_keeps_successes_in_order() {
    let primary = FakeSource::new("primary", &[("INFY.NS", 1500.0), ("TCS.NS", 3500.0)]);
    let aggregator = QuoteAggregator::builder()
        .source(primary)
        .config(seeded_config())
        .build()
        .unwrap();

    let universe = ["TCS.NS", "BOGUS.NS", "INFY.NS"];
    let acquisition = aggregator.acquire(&universe).await;

    assert_eq!(acquisition.origin, QuoteOrigin::Source("primary"));
    assert_eq!(acquisition.status(), ConnectivityStatus::Connected);
    assert_eq!(symbols(&acquisition.quotes), vec!["TCS", "INFY"]);

    let tcs = &acquisition.quotes[0];
    assert_eq!(tcs.name, "Tata Consultancy Services Limited");
    assert_eq!(tcs.sector, "IT");
    assert_eq!(tcs.exchange, Exchange::Nse);
    assert_eq!(tcs.volume, 5_000);
    assert!(tcs.is_valid());
}

#[tokio::test]
async fn test_secondary_used_when_primary_empty() {
    let primary = Arc::new(FakeSource::empty("primary"));
    let secondary = FakeSource::new("secondary", &[("SBIN.NS", 600.0)]);
    let aggregator = QuoteAggregator::builder()
        .shared_source(primary.clone())
        .source(secondary)
        .config(seeded_config())
        .build()
        .unwrap();

    let acquisition = aggregator.acquire(&["SBIN.NS", "ITC.NS"]).await;

    assert_eq!(acquisition.origin, QuoteOrigin::Source("secondary"));
    assert_eq!(symbols(&acquisition.quotes), vec!["SBIN"]);
    assert_eq!(acquisition.quotes[0].sector, "Banking");
    assert_eq!(primary.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_duplicate_listing_first_wins() {
    let primary = FakeSource::new("primary", &[("TCS.NS", 3500.0), ("TCS.BO", 3499.0)]);
    let aggregator = QuoteAggregator::builder()
        .source(primary)
        .config(seeded_config())
        .build()
        .unwrap();

    let quotes = aggregator.fetch_quotes(&["TCS.NS", "TCS.BO"]).await;

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].exchange, Exchange::Nse);
    assert_eq!(quotes[0].price, 3500.0);
}

#[tokio::test]
async fn test_concurrent_requests_keep_universe_order() {
    let primary = FakeSource::new("primary", &[("A.NS", 1.0), ("B.NS", 2.0), ("C.NS", 3.0)])
        .with_delay("A.NS", 30)
        .with_delay("B.NS", 20)
        .with_delay("C.NS", 10);
    let aggregator = QuoteAggregator::builder()
        .source(primary)
        .config(AggregatorConfig {
            concurrency: Some(2),
            seed: Some(1),
        })
        .build()
        .unwrap();

    let quotes = aggregator.fetch_quotes(&["A.NS", "B.NS", "C.NS"]).await;
    assert_eq!(symbols(&quotes), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_requests_within_a_source_overlap() {
    const DELAY_MS: u64 = 200;
    let universe: Vec<String> = (0..10).map(|i| format!("S{}.NS", i)).collect();
    let prices: Vec<(&str, f64)> = universe.iter().map(|t| (t.as_str(), 10.0)).collect();
    let slow = universe
        .iter()
        .fold(FakeSource::new("slow", &prices), |source, ticker| {
            source.with_delay(ticker, DELAY_MS)
        });
    let aggregator = QuoteAggregator::builder()
        .source(slow)
        .config(seeded_config())
        .build()
        .unwrap();

    let started = Instant::now();
    let acquisition = aggregator.acquire(universe.as_slice()).await;
    let elapsed = started.elapsed();

    assert_eq!(acquisition.origin, QuoteOrigin::Source("slow"));
    assert_eq!(acquisition.quotes.len(), 10);
    assert!(
        elapsed < Duration::from_millis(2 * DELAY_MS),
        "10 requests took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_empty_universe_serves_fallback() {
    let aggregator = QuoteAggregator::builder()
        .source(FakeSource::new("primary", &[("TCS.NS", 3500.0)]))
        .config(seeded_config())
        .build()
        .unwrap();

    let acquisition = aggregator.acquire::<&str>(&[]).await;
    assert!(acquisition.is_fallback());
    assert_eq!(acquisition.quotes.len(), 6);
}

#[tokio::test]
async fn test_seeded_runs_are_reproducible() {
    let build = || {
        QuoteAggregator::builder()
            .source(FakeSource::new("primary", &[("TCS.NS", 3500.0)]))
            .config(seeded_config())
            .build()
            .unwrap()
    };

    let a = build().fetch_quotes(&["TCS.NS"]).await;
    let b = build().fetch_quotes(&["TCS.NS"]).await;
    assert_eq!(a[0].pe, b[0].pe);
    assert_eq!(a[0].recommendation, b[0].recommendation);
    assert_eq!(a[0].bulk_orders, b[0].bulk_orders);
}

#[tokio::test]
async fn test_board_refresh_then_screen() {
    let aggregator = QuoteAggregator::builder()
        .config(seeded_config())
        .build()
        .unwrap();
    let board = MarketBoard::new();

    assert!(board.refresh(&aggregator, &["TCS.NS"]).await);
    assert_eq!(board.status().await, ConnectivityStatus::Disconnected);
    assert!(!board.is_loading());

    let snapshot = board.snapshot().await;
    let result = screen(&snapshot, &ScreeningCriteria::default());
    assert_eq!(result.total_count, 6);
    assert_eq!(
        symbols(&result.potential_winners),
        vec!["PAGEIND", "RAJESHEXPO", "DELTACORP"]
    );
}

#[tokio::test]
async fn test_overlapping_refresh_is_skipped() {
    let slow = FakeSource::new("slow", &[("TCS.NS", 3500.0)]).with_delay("TCS.NS", 50);
    let aggregator = QuoteAggregator::builder()
        .source(slow)
        .config(seeded_config())
        .build()
        .unwrap();
    let board = MarketBoard::new();
    let universe = ["TCS.NS"];

    let (first, second) = tokio::join!(
        board.refresh(&aggregator, &universe),
        board.refresh(&aggregator, &universe)
    );

    assert!(first);
    assert!(!second);
    assert_eq!(board.snapshot().await.len(), 1);
    assert_eq!(board.origin().await, Some(QuoteOrigin::Source("slow")));

    // The guard is released once the first refresh completes.
    assert!(board.refresh(&aggregator, &universe).await);
}
