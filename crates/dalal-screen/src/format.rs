//! Number formatting in the Indian convention.

/// One crore.
pub const CRORE: f64 = 10_000_000.0;

/// One lakh.
pub const LAKH: f64 = 100_000.0;

/// Abbreviate a number using crore, lakh and thousand suffixes.
///
/// ```
/// use dalal_screen::format_indian_number;
///
/// assert_eq!(format_indian_number(25_000_000.0), "2.5 Cr");
/// assert_eq!(format_indian_number(250_000.0), "2.5 L");
/// assert_eq!(format_indian_number(2_500.0), "2.5K");
/// assert_eq!(format_indian_number(25.0), "25.00");
/// ```
pub fn format_indian_number(value: f64) -> String {
    if value >= CRORE {
        format!("{:.1} Cr", value / CRORE)
    } else if value >= LAKH {
        format!("{:.1} L", value / LAKH)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a percentage with an explicit sign, e.g. `+3.7%`.
pub fn format_signed_pct(value: f64) -> String {
    format!("{:+.1}%", value)
}
