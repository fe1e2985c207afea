//! Plain-text rendering of screening results and the universe.

use dalal::universe::{DEFAULT_SECTOR, IndianUniverse, ReferenceData};
use dalal::{ConnectivityStatus, QuoteOrigin, Universe};
use chrono::{DateTime, Utc};
use dalal_data::Quote;
use dalal_screen::cap_tier::{LARGE_CAP_THRESHOLD, MID_CAP_THRESHOLD};
use dalal_screen::format::format_signed_pct;
use dalal_screen::{
    CapTier, ScreeningResult, TOP_BUYS_PER_TIER, format_indian_number, is_potential_winner,
};
use std::collections::BTreeMap;
use std::fmt;

const BOX_WIDTH: usize = 62;

/// Boxed title line.
pub(crate) struct Banner<'a>(pub(crate) &'a str);

impl fmt::Display for Banner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "═".repeat(BOX_WIDTH);
        writeln!(f, "╔{}╗", rule)?;
        writeln!(f, "║{:^width$}║", self.0, width = BOX_WIDTH)?;
        writeln!(f, "╚{}╝", rule)
    }
}

fn tier_range(tier: CapTier) -> String {
    match tier {
        CapTier::Large => format!("> ₹{:.0} Cr", LARGE_CAP_THRESHOLD),
        CapTier::Mid => format!("₹{:.0}-{:.0} Cr", MID_CAP_THRESHOLD, LARGE_CAP_THRESHOLD),
        CapTier::Small => format!("<= ₹{:.0} Cr", MID_CAP_THRESHOLD),
    }
}

fn tier_blurb(tier: CapTier) -> &'static str {
    match tier {
        CapTier::Large => "Stable, established market leaders",
        CapTier::Mid => "Growth potential with moderate risk",
        CapTier::Small => "High growth potential, higher risk",
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str, subtitle: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{} - {}", title, subtitle)?;
    writeln!(f, "{}", "─".repeat(BOX_WIDTH + 2))
}

fn winner_row(f: &mut fmt::Formatter<'_>, q: &Quote) -> fmt::Result {
    writeln!(f, "  {:<12} ₹{:<12.2} {}", q.symbol, q.price, q.name)?;
    writeln!(
        f,
        "    P/E {:.1} | ROE {:.1}% | Profit {:.1}% | Sales {:.1}% | FII {} | vs 200 EMA {}",
        q.pe,
        q.roe,
        q.profit_growth,
        q.sales_growth,
        format_signed_pct(q.fii_change),
        format_signed_pct(q.ema200_premium_pct()),
    )
}

fn bulk_row(f: &mut fmt::Formatter<'_>, q: &Quote) -> fmt::Result {
    let orders = &q.bulk_orders;
    writeln!(
        f,
        "  {:<12} ₹{} Cr  {:<18} {:<14} ₹{:.2}  {}",
        q.symbol,
        orders.order_value,
        orders.order_type.map(|t| t.label()).unwrap_or_default(),
        orders.quantity,
        q.price,
        q.recommendation.label().to_uppercase(),
    )
}

fn stock_row(f: &mut fmt::Formatter<'_>, q: &Quote) -> fmt::Result {
    let mut badges = String::new();
    if q.has_bulk_orders() {
        badges.push_str(" [BULK ORDER]");
    }
    if is_potential_winner(q) {
        badges.push_str(" [WINNER]");
    }

    writeln!(
        f,
        "  {:<12} {} {:<4} ₹{:.2} ({}){}",
        q.symbol,
        q.exchange,
        q.recommendation.label().to_uppercase(),
        q.price,
        format_signed_pct(q.change_pct()),
        badges
    )?;
    writeln!(f, "    {}", q.name)?;
    writeln!(
        f,
        "    P/E {:.1} | ROE {:.1}% | MCap ₹{} | Profit {:.1}% | Sales {:.1}% | FII {:.1}% ({}) | RSI {:.1}",
        q.pe,
        q.roe,
        format_indian_number(q.market_cap),
        q.profit_growth,
        q.sales_growth,
        q.fii_holding,
        format_signed_pct(q.fii_change),
        q.rsi,
    )?;
    if let Some(order_type) = q.bulk_orders.order_type.filter(|_| q.has_bulk_orders()) {
        writeln!(
            f,
            "    Bulk order: ₹{} Cr, {}, {}",
            q.bulk_orders.order_value,
            order_type.label(),
            q.bulk_orders.quantity
        )?;
    }
    writeln!(f, "    Last updated: {}", q.last_updated.format("%H:%M:%S"))
}

/// Full text report of one screening pass.
pub(crate) struct Report<'a> {
    pub(crate) result: &'a ScreeningResult,
    pub(crate) status: ConnectivityStatus,
    pub(crate) origin: Option<QuoteOrigin>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;

        write!(f, "{}", Banner("INDIAN STOCK SCREENER"))?;
        match self.origin {
            Some(origin) => writeln!(f, "Status: {} ({})", self.status, origin)?,
            None => writeln!(f, "Status: {}", self.status)?,
        }
        if !self.status.is_live() {
            writeln!(f, "Prices are indicative, not live exchange quotes")?;
        }

        if r.is_empty() {
            writeln!(f)?;
            writeln!(f, "No stocks found matching your criteria")?;
            return writeln!(f, "Try adjusting your filters to see more results");
        }

        writeln!(f)?;
        writeln!(f, "  Total Stocks Analyzed: {:>4}", r.total_count)?;
        writeln!(f, "  Potential Winners:     {:>4}", r.winner_count())?;
        writeln!(f, "  Buy Recommendations:   {:>4}", r.buy_count)?;
        writeln!(f, "  Bulk Order Activity:   {:>4}", r.bulk_order_activity.len())?;
        writeln!(
            f,
            "  Buy / Hold / Sell:     {} / {} / {}",
            r.buy_count, r.hold_count, r.sell_count
        )?;

        if !r.potential_winners.is_empty() {
            section(
                f,
                "POTENTIAL WINNER STOCKS",
                "PE<30, ROE>25%, +50% Growth, Above 200 EMA",
            )?;
            for q in &r.potential_winners {
                winner_row(f, q)?;
            }
        }

        if !r.bulk_order_activity.is_empty() {
            section(
                f,
                "SIGNIFICANT BULK ORDER ACTIVITY",
                "Institutional Interest Indicators",
            )?;
            for q in &r.bulk_order_activity {
                bulk_row(f, q)?;
            }
        }

        for tier in CapTier::all() {
            let buys = r.top_buys_by_tier.tier(tier);
            if buys.is_empty() {
                continue;
            }
            let title = format!(
                "TOP {} {} BUY RECOMMENDATIONS ({})",
                TOP_BUYS_PER_TIER,
                tier.title().to_uppercase(),
                tier_range(tier)
            );
            section(f, &title, tier_blurb(tier))?;
            for q in buys {
                stock_row(f, q)?;
            }
        }

        Ok(())
    }
}

/// Prices of the displayed stocks after a simulated move.
pub(crate) struct PriceUpdate<'a> {
    pub(crate) quotes: &'a [Quote],
    pub(crate) at: DateTime<Utc>,
}

impl fmt::Display for PriceUpdate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Price update {}", self.at.format("%H:%M:%S"))?;
        for q in self.quotes {
            writeln!(
                f,
                "  {:<12} ₹{:<12.2} {}",
                q.symbol,
                q.price,
                format_signed_pct(q.change_pct())
            )?;
        }
        Ok(())
    }
}

/// Universe listing with resolved names and sectors.
pub(crate) struct UniverseTable<'a> {
    pub(crate) universe: &'a IndianUniverse,
    pub(crate) reference: &'a ReferenceData,
}

impl fmt::Display for UniverseTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Indian Equity Universe")?;
        writeln!(f, "======================\n")?;
        writeln!(f, "Total constituents: {}\n", self.universe.size())?;

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let rows = self.universe.tickers().iter().zip(self.universe.canonical());
        for (ticker, (symbol, exchange)) in rows {
            let sector = self.reference.resolve_sector(symbol);
            writeln!(
                f,
                "  {:<16} {:<4} {:<42} {}",
                ticker,
                exchange.code(),
                self.reference.resolve_name(symbol, None),
                sector
            )?;
            *counts.entry(sector).or_insert(0) += 1;
        }

        writeln!(f, "\nBreakdown by sector:")?;
        for (sector, count) in counts.iter().filter(|(s, _)| s.as_str() != DEFAULT_SECTOR) {
            writeln!(f, "  {:30} {:3} stocks", sector, count)?;
        }
        if let Some(count) = counts.get(DEFAULT_SECTOR) {
            writeln!(f, "  {:30} {:3} stocks", DEFAULT_SECTOR, count)?;
        }

        writeln!(
            f,
            "\nSector filter values: {}",
            self.reference.sector_labels().join(", ")
        )?;
        Ok(())
    }
}
