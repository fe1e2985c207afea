//! Filter, rank and bucket a quote collection.

use crate::cap_tier::CapTier;
use crate::criteria::ScreeningCriteria;
use crate::winner::is_potential_winner;
use dalal_data::{Quote, Recommendation};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Length of each per-tier buy list.
pub const TOP_BUYS_PER_TIER: usize = 5;

/// Highest-ranked buy recommendations in each cap tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopBuys {
    /// Large cap buys
    pub large: Vec<Quote>,
    /// Mid cap buys
    pub mid: Vec<Quote>,
    /// Small cap buys
    pub small: Vec<Quote>,
}

impl TopBuys {
    /// Buy list for one tier.
    pub fn tier(&self, tier: CapTier) -> &[Quote] {
        match tier {
            CapTier::Large => &self.large,
            CapTier::Mid => &self.mid,
            CapTier::Small => &self.small,
        }
    }

    fn tier_mut(&mut self, tier: CapTier) -> &mut Vec<Quote> {
        match tier {
            CapTier::Large => &mut self.large,
            CapTier::Mid => &mut self.mid,
            CapTier::Small => &mut self.small,
        }
    }
}

/// Outcome of one screening pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResult {
    /// Number of quotes that passed the filters
    pub total_count: usize,
    /// Passing quotes recommended buy
    pub buy_count: usize,
    /// Passing quotes recommended hold
    pub hold_count: usize,
    /// Passing quotes recommended sell
    pub sell_count: usize,
    /// Every passing quote, ranked
    pub matches: Vec<Quote>,
    /// Passing quotes that meet every winner condition, ranked
    pub potential_winners: Vec<Quote>,
    /// Passing quotes with bulk order activity, ranked
    pub bulk_order_activity: Vec<Quote>,
    /// First five buys per cap tier, ranked
    pub top_buys_by_tier: TopBuys,
}

impl ScreeningResult {
    /// Number of potential winners.
    pub fn winner_count(&self) -> usize {
        self.potential_winners.len()
    }

    /// Whether nothing passed the filters.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// Ranking order: recommendation priority descending, then ROE descending.
pub fn compare_rank(a: &Quote, b: &Quote) -> Ordering {
    b.recommendation
        .priority()
        .cmp(&a.recommendation.priority())
        .then_with(|| b.roe.total_cmp(&a.roe))
}

/// Sort quotes into ranking order. The sort is stable, so ties keep their
/// input order.
pub fn sort_quotes(quotes: &mut [Quote]) {
    quotes.sort_by(compare_rank);
}

/// Screen a quote collection.
///
/// Keeps the quotes that pass `criteria`, ranks them, and derives every
/// result bucket from the ranked list. Quote memberships are recomputed
/// from field values here; nothing is cached on the quotes. An empty input
/// or an empty filtered set yields an empty result.
pub fn screen(quotes: &[Quote], criteria: &ScreeningCriteria) -> ScreeningResult {
    let mut matches: Vec<Quote> = quotes
        .iter()
        .filter(|q| criteria.matches(q))
        .cloned()
        .collect();
    sort_quotes(&mut matches);

    let mut result = ScreeningResult {
        total_count: matches.len(),
        ..Default::default()
    };

    for quote in &matches {
        match quote.recommendation {
            Recommendation::Buy => result.buy_count += 1,
            Recommendation::Hold => result.hold_count += 1,
            Recommendation::Sell => result.sell_count += 1,
        }

        if is_potential_winner(quote) {
            result.potential_winners.push(quote.clone());
        }
        if quote.has_bulk_orders() {
            result.bulk_order_activity.push(quote.clone());
        }
        if quote.recommendation == Recommendation::Buy {
            let tier = result
                .top_buys_by_tier
                .tier_mut(CapTier::classify(quote.market_cap));
            if tier.len() < TOP_BUYS_PER_TIER {
                tier.push(quote.clone());
            }
        }
    }

    debug!(
        screened = quotes.len(),
        matched = result.total_count,
        winners = result.potential_winners.len(),
        bulk = result.bulk_order_activity.len(),
        "Screening pass complete"
    );

    result.matches = matches;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::quote;
    use dalal_data::{BulkOrders, OrderType};

    fn ranked(symbol: &str, recommendation: Recommendation, roe: f64) -> Quote {
        let mut q = quote(symbol);
        q.recommendation = recommendation;
        q.roe = roe;
        q
    }

    #[test]
    fn test_sort_by_recommendation_then_roe() {
        let mut quotes = vec![
            ranked("A", Recommendation::Sell, 50.0),
            ranked("B", Recommendation::Buy, 10.0),
            ranked("C", Recommendation::Hold, 40.0),
            ranked("D", Recommendation::Buy, 30.0),
        ];
        sort_quotes(&mut quotes);

        let order: Vec<_> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(order, vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut quotes = vec![
            ranked("X", Recommendation::Hold, 20.0),
            ranked("Y", Recommendation::Hold, 20.0),
            ranked("Z", Recommendation::Hold, 20.0),
        ];
        sort_quotes(&mut quotes);

        let order: Vec<_> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(order, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_empty_input() {
        let result = screen(&[], &ScreeningCriteria::default());
        assert_eq!(result, ScreeningResult::default());
        assert!(result.is_empty());
        assert_eq!(result.winner_count(), 0);
    }

    #[test]
    fn test_everything_filtered_out() {
        let quotes = vec![quote("A"), quote("B")];
        let criteria = ScreeningCriteria::new().with_min_roe(99.0);
        let result = screen(&quotes, &criteria);

        assert!(result.is_empty());
        assert!(result.top_buys_by_tier.large.is_empty());
        assert_eq!(result.buy_count + result.hold_count + result.sell_count, 0);
    }

    #[test]
    fn test_counts() {
        let quotes = vec![
            ranked("A", Recommendation::Buy, 10.0),
            ranked("B", Recommendation::Buy, 11.0),
            ranked("C", Recommendation::Hold, 12.0),
            ranked("D", Recommendation::Sell, 13.0),
        ];
        let result = screen(&quotes, &ScreeningCriteria::default());

        assert_eq!(result.total_count, 4);
        assert_eq!(result.buy_count, 2);
        assert_eq!(result.hold_count, 1);
        assert_eq!(result.sell_count, 1);
    }

    #[test]
    fn test_top_buys_truncated_per_tier() {
        let mut quotes = Vec::new();
        for i in 0..8 {
            let mut q = ranked(&format!("L{}", i), Recommendation::Buy, i as f64);
            q.market_cap = 300_000.0;
            quotes.push(q);
        }
        let mut mid_hold = ranked("MH", Recommendation::Hold, 99.0);
        mid_hold.market_cap = 100_000.0;
        quotes.push(mid_hold);
        let mut small_buy = ranked("SB", Recommendation::Buy, 5.0);
        small_buy.market_cap = 50_000.0;
        quotes.push(small_buy);

        let result = screen(&quotes, &ScreeningCriteria::default());
        let large: Vec<_> = result
            .top_buys_by_tier
            .large
            .iter()
            .map(|q| q.symbol.as_str())
            .collect();

        assert_eq!(large, vec!["L7", "L6", "L5", "L4", "L3"]);
        assert!(result.top_buys_by_tier.mid.is_empty());
        assert_eq!(result.top_buys_by_tier.tier(CapTier::Small).len(), 1);
        assert_eq!(result.top_buys_by_tier.small[0].symbol, "SB");
    }

    #[test]
    fn test_memberships_overlap() {
        let mut q = ranked("DELTACORP", Recommendation::Buy, 28.9);
        q.pe = 12.8;
        q.fii_change = 4.5;
        q.profit_growth = 89.4;
        q.sales_growth = 67.8;
        q.price = 189.45;
        q.ema200 = 165.30;
        q.market_cap = 5_067.0;
        q.bulk_orders = BulkOrders::new(234.5, OrderType::DiiBuy, "12.37L shares");

        let result = screen(std::slice::from_ref(&q), &ScreeningCriteria::default());

        assert_eq!(result.potential_winners.len(), 1);
        assert_eq!(result.bulk_order_activity.len(), 1);
        assert_eq!(result.top_buys_by_tier.small.len(), 1);
    }

    #[test]
    fn test_buckets_follow_rank_order() {
        let mut low = ranked("LOW", Recommendation::Hold, 10.0);
        low.bulk_orders = BulkOrders::new(100.0, OrderType::FiiBuy, "1.00L shares");
        let mut high = ranked("HIGH", Recommendation::Buy, 10.0);
        high.bulk_orders = BulkOrders::new(100.0, OrderType::FiiBuy, "1.00L shares");

        let result = screen(&[low, high], &ScreeningCriteria::default());
        assert_eq!(result.bulk_order_activity[0].symbol, "HIGH");
        assert_eq!(result.matches[0].symbol, "HIGH");
    }
}
