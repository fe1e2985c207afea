//! Static fallback dataset.
//!
//! Hand-authored quotes for a representative subset of the universe, served
//! when every live source comes back empty. Each seed carries a jitter band;
//! the emitted price is `base + (u - 0.5) * band` for `u` in `[0, 1)`, so it
//! stays within half a band of the seed value.

use crate::model::{BulkOrders, Exchange, OrderType, Quote, Recommendation};
use chrono::{DateTime, Utc};
use rand::Rng;

/// A seed quote and its display jitter band.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackSeed {
    /// Quote at its base price
    pub quote: Quote,
    /// Full width of the price jitter band
    pub jitter_band: f64,
}

impl FallbackSeed {
    /// Copy of the seed quote with its price jittered inside the band.
    pub fn jittered<R: Rng + ?Sized>(&self, rng: &mut R) -> Quote {
        let mut quote = self.quote.clone();
        let offset = (rng.random::<f64>() - 0.5) * self.jitter_band;
        quote.price = (quote.price + offset).max(0.01);
        quote
    }
}

struct Fundamentals {
    pe: f64,
    roe: f64,
    market_cap: f64,
    debt_to_equity: f64,
    revenue_growth: f64,
    eps_growth: f64,
    rsi: f64,
    volume: u64,
    recommendation: Recommendation,
    ema200: f64,
    current_eps: f64,
    previous_eps: f64,
    profit_growth: f64,
    sales_growth: f64,
    fii_holding: f64,
    fii_change: f64,
    dii_holding: f64,
    dii_change: f64,
}

fn seed(
    (symbol, name, sector): (&str, &str, &str),
    (price, jitter_band): (f64, f64),
    f: Fundamentals,
    bulk_orders: BulkOrders,
    at: DateTime<Utc>,
) -> FallbackSeed {
    FallbackSeed {
        quote: Quote {
            symbol: symbol.to_string(),
            name: name.to_string(),
            exchange: Exchange::Nse,
            sector: sector.to_string(),
            price,
            previous_close: price,
            volume: f.volume,
            market_cap: f.market_cap,
            pe: f.pe,
            roe: f.roe,
            debt_to_equity: f.debt_to_equity,
            revenue_growth: f.revenue_growth,
            eps_growth: f.eps_growth,
            profit_growth: f.profit_growth,
            sales_growth: f.sales_growth,
            current_eps: f.current_eps,
            previous_eps: f.previous_eps,
            ema200: f.ema200,
            fii_holding: f.fii_holding,
            fii_change: f.fii_change,
            dii_holding: f.dii_holding,
            dii_change: f.dii_change,
            rsi: f.rsi,
            recommendation: f.recommendation,
            bulk_orders,
            last_updated: at,
        },
        jitter_band,
    }
}

/// The seed dataset, stamped with `at`.
pub fn seeds(at: DateTime<Utc>) -> Vec<FallbackSeed> {
    use Recommendation::Buy;

    vec![
        seed(
            ("TCS", "Tata Consultancy Services Limited", "IT"),
            (3456.75, 100.0),
            Fundamentals {
                pe: 24.8,
                roe: 45.2,
                market_cap: 1_256_789.0,
                debt_to_equity: 0.05,
                revenue_growth: 16.8,
                eps_growth: 14.2,
                rsi: 58.3,
                volume: 2_456_789,
                recommendation: Buy,
                ema200: 3200.45,
                current_eps: 156.78,
                previous_eps: 142.34,
                profit_growth: 18.5,
                sales_growth: 62.4,
                fii_holding: 39.8,
                fii_change: 3.7,
                dii_holding: 17.2,
                dii_change: 2.8,
            },
            BulkOrders::new(987.4, OrderType::FiiBuy, "2.16L shares"),
            at,
        ),
        seed(
            ("PAGEIND", "Page Industries Limited", "Textiles"),
            (43210.45, 1000.0),
            Fundamentals {
                pe: 28.7,
                roe: 35.9,
                market_cap: 48_234.0,
                debt_to_equity: 0.03,
                revenue_growth: 54.8,
                eps_growth: 59.2,
                rsi: 69.8,
                volume: 12_345,
                recommendation: Buy,
                ema200: 39800.25,
                current_eps: 1505.23,
                previous_eps: 945.67,
                profit_growth: 59.2,
                sales_growth: 54.8,
                fii_holding: 28.9,
                fii_change: 2.1,
                dii_holding: 22.4,
                dii_change: 1.8,
            },
            BulkOrders::new(345.6, OrderType::InsuranceBuy, "0.08L shares"),
            at,
        ),
        seed(
            ("DELTACORP", "Delta Corp Limited", "Gaming"),
            (189.45, 10.0),
            Fundamentals {
                pe: 12.8,
                roe: 28.9,
                market_cap: 5_067.0,
                debt_to_equity: 0.23,
                revenue_growth: 67.8,
                eps_growth: 89.4,
                rsi: 74.5,
                volume: 3_456_789,
                recommendation: Buy,
                ema200: 165.30,
                current_eps: 14.80,
                previous_eps: 7.82,
                profit_growth: 89.4,
                sales_growth: 67.8,
                fii_holding: 18.9,
                fii_change: 4.5,
                dii_holding: 26.7,
                dii_change: 3.2,
            },
            BulkOrders::new(234.5, OrderType::DiiBuy, "12.37L shares"),
            at,
        ),
        seed(
            ("RAJESHEXPO", "Rajesh Exports Limited", "Gems & Jewellery"),
            (345.67, 15.0),
            Fundamentals {
                pe: 8.9,
                roe: 31.4,
                market_cap: 1_234.0,
                debt_to_equity: 0.34,
                revenue_growth: 78.9,
                eps_growth: 124.5,
                rsi: 76.8,
                volume: 2_345_678,
                recommendation: Buy,
                ema200: 298.45,
                current_eps: 38.83,
                previous_eps: 17.30,
                profit_growth: 124.5,
                sales_growth: 78.9,
                fii_holding: 12.4,
                fii_change: 5.8,
                dii_holding: 34.7,
                dii_change: 4.2,
            },
            BulkOrders::new(123.4, OrderType::PromoterBuy, "3.57L shares"),
            at,
        ),
        seed(
            ("HDFCBANK", "HDFC Bank Limited", "Banking"),
            (1567.30, 50.0),
            Fundamentals {
                pe: 19.2,
                roe: 17.8,
                market_cap: 1_167_890.0,
                debt_to_equity: 6.2,
                revenue_growth: 18.5,
                eps_growth: 15.3,
                rsi: 55.7,
                volume: 3_456_789,
                recommendation: Buy,
                ema200: 1520.45,
                current_eps: 81.64,
                previous_eps: 70.78,
                profit_growth: 15.3,
                sales_growth: 18.5,
                fii_holding: 55.7,
                fii_change: 0.8,
                dii_holding: 9.2,
                dii_change: -0.1,
            },
            BulkOrders::none(),
            at,
        ),
        seed(
            ("ICICIBANK", "ICICI Bank Limited", "Banking"),
            (987.65, 30.0),
            Fundamentals {
                pe: 16.4,
                roe: 18.9,
                market_cap: 690_000.0,
                debt_to_equity: 5.8,
                revenue_growth: 21.3,
                eps_growth: 19.7,
                rsi: 64.2,
                volume: 5_432_109,
                recommendation: Buy,
                ema200: 920.50,
                current_eps: 60.23,
                previous_eps: 50.34,
                profit_growth: 19.7,
                sales_growth: 21.3,
                fii_holding: 58.9,
                fii_change: 2.1,
                dii_holding: 11.5,
                dii_change: 0.7,
            },
            BulkOrders::new(1876.3, OrderType::InstitutionalBuy, "19.0L shares"),
            at,
        ),
    ]
}

/// The fallback dataset with jittered prices, stamped with `at`.
pub fn fallback_quotes<R: Rng + ?Sized>(rng: &mut R, at: DateTime<Utc>) -> Vec<Quote> {
    seeds(at).iter().map(|s| s.jittered(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_seed_symbols_unique() {
        let seeds = seeds(Utc::now());
        let symbols: HashSet<_> = seeds.iter().map(|s| s.quote.symbol.as_str()).collect();
        assert_eq!(symbols.len(), seeds.len());
        assert_eq!(seeds.len(), 6);
    }

    #[test]
    fn test_seeds_are_valid_quotes() {
        for seed in seeds(Utc::now()) {
            assert!(seed.quote.is_valid(), "{} is not valid", seed.quote.symbol);
            assert!(seed.jitter_band > 0.0);
        }
    }

    #[test]
    fn test_jitter_within_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let at = Utc::now();
        let seeds = seeds(at);

        for _ in 0..50 {
            let quotes = fallback_quotes(&mut rng, at);
            for (quote, seed) in quotes.iter().zip(&seeds) {
                assert_eq!(quote.symbol, seed.quote.symbol);
                assert!((quote.price - seed.quote.price).abs() <= seed.jitter_band / 2.0);
                assert_eq!(quote.last_updated, at);
            }
        }
    }

    #[test]
    fn test_jitter_only_touches_price() {
        let mut rng = StdRng::seed_from_u64(11);
        let seed = &seeds(Utc::now())[0];
        let quote = seed.jittered(&mut rng);

        assert_eq!(quote.pe, seed.quote.pe);
        assert_eq!(quote.bulk_orders, seed.quote.bulk_orders);
        assert_eq!(quote.previous_close, seed.quote.previous_close);
    }
}
