//! Relative Strength Index
//!
//! Simple (non-smoothed) RSI over the first window of a close history:
//! total gains and total losses across consecutive closes are each averaged
//! over [`RSI_PERIOD`] and combined as `100 - 100 / (1 + avg_gain / avg_loss)`.

/// Averaging period.
pub const RSI_PERIOD: usize = 14;

/// Value reported when there is not enough history to say anything.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Compute the RSI of a close history, oldest first.
///
/// Histories shorter than [`RSI_PERIOD`] return [`NEUTRAL_RSI`]. Only the
/// first `RSI_PERIOD + 1` closes are read. A window with gains and no losses
/// saturates at 100; a window with no movement at all is neutral.
///
/// ```
/// use dalal_factors::rsi;
///
/// let rising: Vec<f64> = (0..20).map(f64::from).collect();
/// assert_eq!(rsi(&rising), 100.0);
/// assert_eq!(rsi(&[1.0, 2.0, 3.0]), 50.0);
/// ```
pub fn rsi(closes: &[f64]) -> f64 {
    if closes.len() < RSI_PERIOD {
        return NEUTRAL_RSI;
    }

    let window = &closes[..closes.len().min(RSI_PERIOD + 1)];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses + change.abs())
            }
        });

    let avg_gain = gains / RSI_PERIOD as f64;
    let avg_loss = losses / RSI_PERIOD as f64;

    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }

    let rs = avg_gain / avg_loss;
    let value = 100.0 - 100.0 / (1.0 + rs);
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        NEUTRAL_RSI
    }
}
