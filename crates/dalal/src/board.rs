//! Shared quote collection with background refresh and price simulation.
//!
//! The board owns the one quote collection every reader sees. Writers
//! replace it wholesale on refresh or perturb prices in place on a tick;
//! both happen under a single write lock, so a reader observes either the
//! old collection or the new one and never a partial mix. Snapshots are
//! `Arc`s, and ticks go through [`Arc::make_mut`], so a snapshot taken
//! before a tick keeps its prices.

use crate::aggregator::{Acquisition, QuoteAggregator, QuoteOrigin};
use crate::status::ConnectivityStatus;
use chrono::{DateTime, Utc};
use dalal_data::Quote;
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Relative width of one simulated price move (±2%).
pub const TICK_AMPLITUDE: f64 = 0.04;

/// Lowest price a simulated move can produce.
pub const PRICE_FLOOR: f64 = 0.01;

#[derive(Debug, Default)]
struct BoardState {
    quotes: Arc<Vec<Quote>>,
    status: ConnectivityStatus,
    origin: Option<QuoteOrigin>,
    last_refresh: Option<DateTime<Utc>>,
}

/// Resets the loading flag when a refresh ends, including by cancellation.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Current quote collection plus its provenance.
#[derive(Debug)]
pub struct MarketBoard {
    state: RwLock<BoardState>,
    loading: AtomicBool,
    refreshed: watch::Sender<u64>,
    ticked: watch::Sender<u64>,
}

impl Default for MarketBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketBoard {
    /// Create an empty board in the connecting state.
    pub fn new() -> Self {
        let (refreshed, _) = watch::channel(0);
        let (ticked, _) = watch::channel(0);
        Self {
            state: RwLock::new(BoardState::default()),
            loading: AtomicBool::new(false),
            refreshed,
            ticked,
        }
    }

    /// Current quotes.
    pub async fn snapshot(&self) -> Arc<Vec<Quote>> {
        Arc::clone(&self.state.read().await.quotes)
    }

    /// Current connectivity status.
    pub async fn status(&self) -> ConnectivityStatus {
        self.state.read().await.status
    }

    /// Origin of the current quotes, `None` before the first refresh.
    pub async fn origin(&self) -> Option<QuoteOrigin> {
        self.state.read().await.origin
    }

    /// Instant of the last completed refresh.
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_refresh
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Receiver that changes once per completed refresh. The value is the
    /// number of refreshes so far.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.refreshed.subscribe()
    }

    /// Receiver that changes once per simulated price move. The value is
    /// the number of ticks so far.
    pub fn subscribe_ticks(&self) -> watch::Receiver<u64> {
        self.ticked.subscribe()
    }

    /// Re-acquire quotes and swap them in.
    ///
    /// Returns `false` without doing anything when another refresh is
    /// already in flight.
    pub async fn refresh<S: AsRef<str> + Sync>(
        &self,
        aggregator: &QuoteAggregator,
        universe: &[S],
    ) -> bool {
        if self.loading.swap(true, Ordering::AcqRel) {
            debug!("Refresh already in flight, skipping");
            return false;
        }
        let _guard = LoadingGuard(&self.loading);

        self.state.write().await.status = ConnectivityStatus::Connecting;
        let acquisition = aggregator.acquire(universe).await;
        self.install(acquisition).await;
        true
    }

    /// Replace the whole collection with an acquisition's quotes.
    pub async fn install(&self, acquisition: Acquisition) {
        let status = acquisition.status();
        let count = acquisition.quotes.len();
        {
            let mut state = self.state.write().await;
            state.quotes = Arc::new(acquisition.quotes);
            state.status = status;
            state.origin = Some(acquisition.origin);
            state.last_refresh = Some(acquisition.fetched_at);
        }
        self.refreshed.send_modify(|n| *n += 1);
        info!(origin = %acquisition.origin, count, status = ?status, "Market board refreshed");
    }

    /// Move every price by a uniform draw within ±2%, floored at
    /// [`PRICE_FLOOR`], and stamp the quotes with the current time.
    /// Tick subscribers are notified once the move is visible to readers.
    pub async fn simulate_tick<R: Rng + ?Sized>(&self, rng: &mut R) {
        let now = Utc::now();
        {
            let mut state = self.state.write().await;
            for quote in Arc::make_mut(&mut state.quotes).iter_mut() {
                let change = (rng.random::<f64>() - 0.5) * TICK_AMPLITUDE;
                quote.price = (quote.price * (1.0 + change)).max(PRICE_FLOOR);
                quote.last_updated = now;
            }
        }
        self.ticked.send_modify(|n| *n += 1);
    }
}

/// Perturb prices every `period` until the task is aborted.
pub fn spawn_price_simulation<R>(
    board: Arc<MarketBoard>,
    period: Duration,
    mut rng: R,
) -> JoinHandle<()>
where
    R: Rng + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            board.simulate_tick(&mut rng).await;
        }
    })
}

/// Refresh the board every `period` until the task is aborted. The first
/// refresh happens one period after spawning.
pub fn spawn_auto_refresh(
    board: Arc<MarketBoard>,
    aggregator: Arc<QuoteAggregator>,
    universe: Arc<Vec<String>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if !board.refresh(&aggregator, universe.as_slice()).await {
                debug!("Auto-refresh skipped");
            }
        }
    })
}
