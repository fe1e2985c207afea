//! Randomised fundamentals.

use super::{MetricsBundle, MetricsSource};
use crate::error::FactorError;
use dalal_data::{BulkOrders, OrderType, Recommendation};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Closed sampling interval for each synthesized field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRanges {
    /// Market cap in crore (default: 10,000 to 500,000)
    pub market_cap: (f64, f64),
    /// P/E (default: 8 to 45)
    pub pe: (f64, f64),
    /// ROE % (default: 5 to 50)
    pub roe: (f64, f64),
    /// Debt to equity (default: 0 to 3)
    pub debt_to_equity: (f64, f64),
    /// Revenue growth % (default: -10 to 80)
    pub revenue_growth: (f64, f64),
    /// EPS growth % (default: -20 to 150)
    pub eps_growth: (f64, f64),
    /// EMA200 as a multiple of price (default: 0.85 to 1.15)
    pub ema200_ratio: (f64, f64),
    /// Current EPS (default: 10 to 200)
    pub current_eps: (f64, f64),
    /// Previous EPS (default: 8 to 150)
    pub previous_eps: (f64, f64),
    /// Profit growth % (default: -15 to 120)
    pub profit_growth: (f64, f64),
    /// Sales growth % (default: -10 to 85)
    pub sales_growth: (f64, f64),
    /// FII holding % (default: 10 to 60)
    pub fii_holding: (f64, f64),
    /// FII change (default: -2 to 5)
    pub fii_change: (f64, f64),
    /// DII holding % (default: 5 to 25)
    pub dii_holding: (f64, f64),
    /// DII change (default: -1 to 3)
    pub dii_change: (f64, f64),
    /// Bulk order value in crore (default: 100 to 5,000)
    pub order_value: (f64, f64),
    /// Bulk order size in lakh shares (default: 1 to 50)
    pub order_lakh_shares: (f64, f64),
    /// Probability a quote has bulk orders (default: 0.4)
    pub bulk_order_probability: f64,
}

impl Default for SynthesisRanges {
    fn default() -> Self {
        Self {
            market_cap: (10_000.0, 500_000.0),
            pe: (8.0, 45.0),
            roe: (5.0, 50.0),
            debt_to_equity: (0.0, 3.0),
            revenue_growth: (-10.0, 80.0),
            eps_growth: (-20.0, 150.0),
            ema200_ratio: (0.85, 1.15),
            current_eps: (10.0, 200.0),
            previous_eps: (8.0, 150.0),
            profit_growth: (-15.0, 120.0),
            sales_growth: (-10.0, 85.0),
            fii_holding: (10.0, 60.0),
            fii_change: (-2.0, 5.0),
            dii_holding: (5.0, 25.0),
            dii_change: (-1.0, 3.0),
            order_value: (100.0, 5_000.0),
            order_lakh_shares: (1.0, 50.0),
            bulk_order_probability: 0.4,
        }
    }
}

impl SynthesisRanges {
    /// Check every interval is finite and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`FactorError::InvalidRange`] for the first bad interval.
    pub fn validate(&self) -> Result<(), FactorError> {
        let fields = [
            ("market_cap", self.market_cap),
            ("pe", self.pe),
            ("roe", self.roe),
            ("debt_to_equity", self.debt_to_equity),
            ("revenue_growth", self.revenue_growth),
            ("eps_growth", self.eps_growth),
            ("ema200_ratio", self.ema200_ratio),
            ("current_eps", self.current_eps),
            ("previous_eps", self.previous_eps),
            ("profit_growth", self.profit_growth),
            ("sales_growth", self.sales_growth),
            ("fii_holding", self.fii_holding),
            ("fii_change", self.fii_change),
            ("dii_holding", self.dii_holding),
            ("dii_change", self.dii_change),
            ("order_value", self.order_value),
            ("order_lakh_shares", self.order_lakh_shares),
            (
                "bulk_order_probability",
                (self.bulk_order_probability, self.bulk_order_probability),
            ),
        ];

        for (field, (low, high)) in fields {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(FactorError::InvalidRange { field, low, high });
            }
        }
        if !(0.0..=1.0).contains(&self.bulk_order_probability) {
            return Err(FactorError::InvalidRange {
                field: "bulk_order_probability",
                low: 0.0,
                high: 1.0,
            });
        }
        Ok(())
    }
}

/// Draws fundamentals from [`SynthesisRanges`] with an injected generator.
///
/// Each call is independent of every previous call; the only state is the
/// generator itself, so a seeded generator gives a reproducible sequence.
pub struct SimulatedMetrics<R = StdRng> {
    rng: Mutex<R>,
    ranges: SynthesisRanges,
}

impl<R> fmt::Debug for SimulatedMetrics<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedMetrics")
            .field("ranges", &self.ranges)
            .finish_non_exhaustive()
    }
}

impl SimulatedMetrics<StdRng> {
    /// Generator seeded from operating system entropy.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> SimulatedMetrics<R> {
    /// Wrap a generator with default ranges.
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
            ranges: SynthesisRanges::default(),
        }
    }

    /// Wrap a generator with custom ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if any range is invalid.
    pub fn with_ranges(rng: R, ranges: SynthesisRanges) -> Result<Self, FactorError> {
        ranges.validate()?;
        Ok(Self {
            rng: Mutex::new(rng),
            ranges,
        })
    }

    /// Get the sampling ranges.
    pub const fn ranges(&self) -> &SynthesisRanges {
        &self.ranges
    }

    fn draw(rng: &mut R, (low, high): (f64, f64)) -> f64 {
        rng.random_range(low..=high)
    }

    // 70% buy-or-hold, of which 40% buy; otherwise sell.
    fn draw_recommendation(rng: &mut R) -> Recommendation {
        if rng.random::<f64>() > 0.3 {
            if rng.random::<f64>() > 0.6 {
                Recommendation::Buy
            } else {
                Recommendation::Hold
            }
        } else {
            Recommendation::Sell
        }
    }

    fn draw_bulk_orders(&self, rng: &mut R) -> BulkOrders {
        if !rng.random_bool(self.ranges.bulk_order_probability) {
            return BulkOrders::none();
        }

        let order_value = Self::draw(rng, self.ranges.order_value);
        let order_type = OrderType::SIMULATED
            .choose(rng)
            .copied()
            .unwrap_or(OrderType::FiiBuy);
        let lakhs = Self::draw(rng, self.ranges.order_lakh_shares);

        BulkOrders::new(order_value, order_type, format!("{:.2}L shares", lakhs))
    }
}

impl<R: Rng + Send> MetricsSource for SimulatedMetrics<R> {
    fn synthesize(&self, _symbol: &str, price: f64) -> MetricsBundle {
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let rng = &mut *guard;
        let r = &self.ranges;

        MetricsBundle {
            market_cap: Self::draw(rng, r.market_cap),
            pe: Self::draw(rng, r.pe),
            roe: Self::draw(rng, r.roe),
            debt_to_equity: Self::draw(rng, r.debt_to_equity),
            revenue_growth: Self::draw(rng, r.revenue_growth),
            eps_growth: Self::draw(rng, r.eps_growth),
            ema200: price * Self::draw(rng, r.ema200_ratio),
            current_eps: Self::draw(rng, r.current_eps),
            previous_eps: Self::draw(rng, r.previous_eps),
            profit_growth: Self::draw(rng, r.profit_growth),
            sales_growth: Self::draw(rng, r.sales_growth),
            fii_holding: Self::draw(rng, r.fii_holding),
            fii_change: Self::draw(rng, r.fii_change),
            dii_holding: Self::draw(rng, r.dii_holding),
            dii_change: Self::draw(rng, r.dii_change),
            recommendation: Self::draw_recommendation(rng),
            bulk_orders: self.draw_bulk_orders(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within((low, high): (f64, f64), value: f64) -> bool {
        (low..=high).contains(&value)
    }

    #[test]
    fn test_fields_within_ranges() {
        let metrics = SimulatedMetrics::seeded(42);
        let r = SynthesisRanges::default();

        for i in 0..500 {
            let price = 100.0 + i as f64;
            let m = metrics.synthesize("TCS", price);

            assert!(within(r.market_cap, m.market_cap));
            assert!(within(r.pe, m.pe));
            assert!(within(r.roe, m.roe));
            assert!(within(r.debt_to_equity, m.debt_to_equity));
            assert!(within(r.revenue_growth, m.revenue_growth));
            assert!(within(r.eps_growth, m.eps_growth));
            assert!(within(r.current_eps, m.current_eps));
            assert!(within(r.previous_eps, m.previous_eps));
            assert!(within(r.profit_growth, m.profit_growth));
            assert!(within(r.sales_growth, m.sales_growth));
            assert!(within(r.fii_holding, m.fii_holding));
            assert!(within(r.fii_change, m.fii_change));
            assert!(within(r.dii_holding, m.dii_holding));
            assert!(within(r.dii_change, m.dii_change));
            assert!(m.ema200 >= price * 0.85 - 1e-9 && m.ema200 <= price * 1.15 + 1e-9);
        }
    }

    #[test]
    fn test_bulk_orders_shape() {
        let metrics = SimulatedMetrics::seeded(7);
        let mut with_orders = 0;

        for _ in 0..500 {
            let orders = metrics.synthesize("INFY", 1500.0).bulk_orders;
            if orders.has_orders {
                with_orders += 1;
                assert!((100.0..=5000.0).contains(&orders.order_value));
                let order_type = orders.order_type.unwrap();
                assert!(OrderType::SIMULATED.contains(&order_type));
                assert!(orders.quantity.ends_with("L shares"));
            } else {
                assert_eq!(orders, BulkOrders::none());
            }
        }

        // 40% nominal; generous band for a 500-draw sample
        assert!((120..=280).contains(&with_orders), "got {}", with_orders);
    }

    #[test]
    fn test_recommendation_distribution() {
        let metrics = SimulatedMetrics::seeded(3);
        let (mut buy, mut hold, mut sell) = (0, 0, 0);

        for _ in 0..2000 {
            match metrics.synthesize("SBIN", 600.0).recommendation {
                Recommendation::Buy => buy += 1,
                Recommendation::Hold => hold += 1,
                Recommendation::Sell => sell += 1,
            }
        }

        // Nominal 28% / 42% / 30%
        assert!((440..=680).contains(&buy), "buy {}", buy);
        assert!((720..=960).contains(&hold), "hold {}", hold);
        assert!((480..=720).contains(&sell), "sell {}", sell);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SimulatedMetrics::seeded(99);
        let b = SimulatedMetrics::seeded(99);

        for _ in 0..10 {
            assert_eq!(a.synthesize("ITC", 450.0), b.synthesize("ITC", 450.0));
        }
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let ranges = SynthesisRanges {
            pe: (45.0, 8.0),
            ..Default::default()
        };
        let err = SimulatedMetrics::with_ranges(StdRng::seed_from_u64(1), ranges).unwrap_err();
        assert_eq!(
            err,
            FactorError::InvalidRange {
                field: "pe",
                low: 45.0,
                high: 8.0
            }
        );

        let ranges = SynthesisRanges {
            bulk_order_probability: 1.5,
            ..Default::default()
        };
        assert!(SimulatedMetrics::with_ranges(StdRng::seed_from_u64(1), ranges).is_err());
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let ranges = SynthesisRanges {
            pe: (20.0, 20.0),
            bulk_order_probability: 0.0,
            ..Default::default()
        };
        let metrics = SimulatedMetrics::with_ranges(StdRng::seed_from_u64(5), ranges).unwrap();
        let m = metrics.synthesize("LT", 3000.0);

        assert_eq!(m.pe, 20.0);
        assert!(!m.bulk_orders.has_orders);
    }
}
