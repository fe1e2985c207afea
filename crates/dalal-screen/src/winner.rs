//! Potential winner classification.
//!
//! A potential winner is cheap, highly profitable, growing fast, gaining
//! foreign ownership and trading above its long-run average. Every condition
//! must hold; there is no partial credit.

use dalal_data::Quote;

/// P/E must be below this.
pub const MAX_PE: f64 = 30.0;

/// ROE must be above this (%).
pub const MIN_ROE: f64 = 25.0;

/// Profit growth must be above this (%).
pub const MIN_PROFIT_GROWTH: f64 = 50.0;

/// Sales growth must be above this (%).
pub const MIN_SALES_GROWTH: f64 = 50.0;

/// Whether a quote is a potential winner.
///
/// `pe < 30`, `roe > 25`, both EPS values positive, FII holding rising,
/// profit and sales growth both above 50%, and price above the 200-day EMA.
pub fn is_potential_winner(quote: &Quote) -> bool {
    quote.pe < MAX_PE
        && quote.roe > MIN_ROE
        && quote.current_eps > 0.0
        && quote.previous_eps > 0.0
        && quote.fii_change > 0.0
        && quote.profit_growth > MIN_PROFIT_GROWTH
        && quote.sales_growth > MIN_SALES_GROWTH
        && quote.price > quote.ema200
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::quote;
    use rstest::rstest;

    fn winner() -> Quote {
        let mut q = quote("DELTACORP");
        q.pe = 12.8;
        q.roe = 28.9;
        q.current_eps = 14.80;
        q.previous_eps = 7.82;
        q.fii_change = 4.5;
        q.profit_growth = 89.4;
        q.sales_growth = 67.8;
        q.price = 189.45;
        q.ema200 = 165.30;
        q
    }

    #[test]
    fn test_all_conditions_met() {
        assert!(is_potential_winner(&winner()));
    }

    #[rstest]
    #[case::pe_at_limit(|q: &mut Quote| q.pe = 30.0)]
    #[case::roe_at_limit(|q: &mut Quote| q.roe = 25.0)]
    #[case::current_eps_zero(|q: &mut Quote| q.current_eps = 0.0)]
    #[case::previous_eps_negative(|q: &mut Quote| q.previous_eps = -1.0)]
    #[case::fii_flat(|q: &mut Quote| q.fii_change = 0.0)]
    #[case::profit_growth_at_limit(|q: &mut Quote| q.profit_growth = 50.0)]
    #[case::sales_growth_at_limit(|q: &mut Quote| q.sales_growth = 50.0)]
    #[case::price_at_ema(|q: &mut Quote| q.price = q.ema200)]
    fn test_single_failure_flips_result(#[case] break_one: fn(&mut Quote)) {
        let mut q = winner();
        break_one(&mut q);
        assert!(!is_potential_winner(&q));
    }

    #[test]
    fn test_tcs_fails_on_profit_growth_alone() {
        let mut q = quote("TCS");
        q.pe = 24.8;
        q.roe = 45.2;
        q.current_eps = 156.78;
        q.previous_eps = 142.34;
        q.fii_change = 3.7;
        q.profit_growth = 18.5;
        q.sales_growth = 62.4;
        q.price = 3456.0;
        q.ema200 = 3200.0;
        assert!(!is_potential_winner(&q));

        q.profit_growth = 50.1;
        assert!(is_potential_winner(&q));
    }
}
