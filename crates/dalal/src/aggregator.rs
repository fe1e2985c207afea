//! Multi-source quote acquisition.
//!
//! [`QuoteAggregator`] queries its sources in rank order. Within one source
//! every ticker is requested concurrently and per-ticker failures are logged
//! and dropped. The first source that yields at least one quote wins the
//! whole acquisition; if none does, the fallback dataset is served with
//! jittered prices. Acquisition therefore always produces quotes.

use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::status::ConnectivityStatus;
use crate::universe::ReferenceData;
use chrono::{DateTime, Utc};
use dalal_data::fallback::fallback_quotes;
use dalal_data::{Exchange, Quote, QuoteSource, RawQuote};
use dalal_factors::{MetricsSource, SimulatedMetrics, SynthesisRanges, rsi};
use futures::stream::{self, StreamExt};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Where the quotes of an acquisition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "name")]
pub enum QuoteOrigin {
    /// A live source, by name
    Source(&'static str),
    /// The fallback dataset
    Fallback,
}

impl fmt::Display for QuoteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(name) => f.write_str(name),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Outcome of one acquisition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acquisition {
    /// Normalized quotes in universe order
    pub quotes: Vec<Quote>,
    /// Branch that produced them
    pub origin: QuoteOrigin,
    /// Acquisition instant, also stamped on every quote
    pub fetched_at: DateTime<Utc>,
}

impl Acquisition {
    /// Connectivity state implied by the origin.
    pub const fn status(&self) -> ConnectivityStatus {
        match self.origin {
            QuoteOrigin::Source(_) => ConnectivityStatus::Connected,
            QuoteOrigin::Fallback => ConnectivityStatus::Disconnected,
        }
    }

    /// Whether the fallback dataset was served.
    pub const fn is_fallback(&self) -> bool {
        matches!(self.origin, QuoteOrigin::Fallback)
    }
}

/// Turn one source payload into a canonical quote.
///
/// Returns `None` when the payload carries neither a usable live price nor
/// a previous close.
pub fn normalize_quote(
    raw: &RawQuote,
    reference: &ReferenceData,
    metrics: &dyn MetricsSource,
    now: DateTime<Utc>,
) -> Option<Quote> {
    let price = raw.effective_price()?;
    let (symbol, exchange) = Exchange::split_symbol(&raw.raw_symbol);
    let m = metrics.synthesize(symbol, price);

    let strength = if raw.closes.is_empty() {
        rsi(&[price])
    } else {
        rsi(&raw.closes)
    };

    Some(Quote {
        symbol: symbol.to_string(),
        name: reference.resolve_name(symbol, raw.long_name.as_deref()),
        exchange,
        sector: reference.resolve_sector(symbol),
        price,
        previous_close: raw
            .previous_close
            .filter(|p| p.is_finite() && *p > 0.0)
            .unwrap_or(price),
        volume: raw.volume.unwrap_or(0),
        market_cap: raw
            .market_cap
            .filter(|c| c.is_finite() && *c > 0.0)
            .unwrap_or(m.market_cap),
        pe: m.pe,
        roe: m.roe,
        debt_to_equity: m.debt_to_equity,
        revenue_growth: m.revenue_growth,
        eps_growth: m.eps_growth,
        profit_growth: m.profit_growth,
        sales_growth: m.sales_growth,
        current_eps: m.current_eps,
        previous_eps: m.previous_eps,
        ema200: m.ema200,
        fii_holding: m.fii_holding,
        fii_change: m.fii_change,
        dii_holding: m.dii_holding,
        dii_change: m.dii_change,
        rsi: strength,
        recommendation: m.recommendation,
        bulk_orders: m.bulk_orders,
        last_updated: now,
    })
}

/// Builder for [`QuoteAggregator`].
#[derive(Default)]
pub struct QuoteAggregatorBuilder {
    sources: Vec<Arc<dyn QuoteSource>>,
    reference: Option<Arc<ReferenceData>>,
    metrics: Option<Arc<dyn MetricsSource>>,
    ranges: Option<SynthesisRanges>,
    config: AggregatorConfig,
}

impl fmt::Debug for QuoteAggregatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteAggregatorBuilder")
            .field("sources", &source_names(&self.sources))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QuoteAggregatorBuilder {
    /// Append a source after every source added so far.
    pub fn source(mut self, source: impl QuoteSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Append an already shared source.
    pub fn shared_source(mut self, source: Arc<dyn QuoteSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Set the reference tables. Defaults to [`ReferenceData::indian_equities`].
    pub fn reference(mut self, reference: impl Into<Arc<ReferenceData>>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the metrics provider. Defaults to [`SimulatedMetrics`], seeded
    /// from the config seed when one is set.
    pub fn metrics(mut self, metrics: impl MetricsSource + 'static) -> Self {
        self.metrics = Some(Arc::new(metrics));
        self
    }

    /// Sampling ranges for the default simulated metrics. Ignored when a
    /// metrics provider is set with [`Self::metrics`].
    pub fn synthesis_ranges(mut self, ranges: SynthesisRanges) -> Self {
        self.ranges = Some(ranges);
        self
    }

    /// Set the tuning options.
    pub fn config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the synthesis ranges are
    /// invalid.
    pub fn build(self) -> Result<QuoteAggregator> {
        self.config.validate()?;

        let seeded = |seed: Option<u64>| match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let metrics: Arc<dyn MetricsSource> = match self.metrics {
            Some(metrics) => metrics,
            None => Arc::new(SimulatedMetrics::with_ranges(
                seeded(self.config.seed),
                self.ranges.unwrap_or_default(),
            )?),
        };
        let jitter = seeded(self.config.seed);

        Ok(QuoteAggregator {
            sources: self.sources,
            reference: self
                .reference
                .unwrap_or_else(|| Arc::new(ReferenceData::indian_equities())),
            metrics,
            jitter: Mutex::new(jitter),
            config: self.config,
        })
    }
}

/// Ranked multi-source quote fetcher with fallback.
pub struct QuoteAggregator {
    sources: Vec<Arc<dyn QuoteSource>>,
    reference: Arc<ReferenceData>,
    metrics: Arc<dyn MetricsSource>,
    jitter: Mutex<StdRng>,
    config: AggregatorConfig,
}

impl fmt::Debug for QuoteAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteAggregator")
            .field("sources", &source_names(&self.sources))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn source_names(sources: &[Arc<dyn QuoteSource>]) -> Vec<&'static str> {
    sources.iter().map(|s| s.name()).collect()
}

impl QuoteAggregator {
    /// Start building an aggregator.
    pub fn builder() -> QuoteAggregatorBuilder {
        QuoteAggregatorBuilder::default()
    }

    /// Reference tables in use.
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Source names in rank order.
    pub fn source_names(&self) -> Vec<&'static str> {
        source_names(&self.sources)
    }

    /// Acquire quotes for `universe`, trying each source in rank order and
    /// falling back to the seed dataset when all of them come back empty.
    pub async fn acquire<S: AsRef<str>>(&self, universe: &[S]) -> Acquisition {
        let fetched_at = Utc::now();

        for source in &self.sources {
            let quotes = self.query_source(source, universe, fetched_at).await;
            if quotes.is_empty() {
                warn!(source = source.name(), "Source returned no quotes");
                continue;
            }
            info!(
                source = source.name(),
                count = quotes.len(),
                requested = universe.len(),
                "Acquired quotes"
            );
            return Acquisition {
                quotes,
                origin: QuoteOrigin::Source(source.name()),
                fetched_at,
            };
        }

        warn!(
            sources = self.sources.len(),
            "All sources exhausted, serving fallback dataset"
        );
        let quotes = {
            let mut rng = self.jitter.lock().unwrap_or_else(PoisonError::into_inner);
            fallback_quotes(&mut *rng, fetched_at)
        };
        Acquisition {
            quotes,
            origin: QuoteOrigin::Fallback,
            fetched_at,
        }
    }

    /// Acquire quotes and drop the provenance.
    pub async fn fetch_quotes<S: AsRef<str>>(&self, universe: &[S]) -> Vec<Quote> {
        self.acquire(universe).await.quotes
    }

    async fn request(source: Arc<dyn QuoteSource>, ticker: String) -> Option<RawQuote> {
        match source.query(&ticker).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(source = source.name(), symbol = %ticker, error = %e, "Quote request failed");
                None
            }
        }
    }

    async fn query_source<S: AsRef<str>>(
        &self,
        source: &Arc<dyn QuoteSource>,
        universe: &[S],
        now: DateTime<Utc>,
    ) -> Vec<Quote> {
        let concurrency = self.config.effective_concurrency(universe.len());

        let requests: Vec<_> = universe
            .iter()
            .map(|ticker| Self::request(Arc::clone(source), ticker.as_ref().to_string()))
            .collect();
        let raws: Vec<Option<RawQuote>> = stream::iter(requests)
            .buffered(concurrency)
            .collect()
            .await;

        let mut seen = HashSet::new();
        let mut quotes = Vec::with_capacity(raws.len());
        for raw in raws.into_iter().flatten() {
            let Some(quote) = normalize_quote(&raw, &self.reference, self.metrics.as_ref(), now)
            else {
                warn!(
                    source = source.name(),
                    symbol = %raw.raw_symbol,
                    "Quote has no usable price"
                );
                continue;
            };
            if !seen.insert(quote.symbol.clone()) {
                debug!(symbol = %quote.symbol, raw = %raw.raw_symbol, "Dropping duplicate listing");
                continue;
            }
            quotes.push(quote);
        }
        quotes
    }
}
