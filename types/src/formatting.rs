//! Centralized number formatting utilities.
//!
//! All numeric display formatting goes through this module so the bar
//! labels, per-entity DPS text and the header total stay consistent.

/// Format a large value with K/M/B suffix for compact display.
///
/// - Values >= 1,000,000,000 are formatted as `X.XXB`
/// - Values >= 1,000,000 are formatted as `X.XXM`
/// - Values >= 1,000 are formatted as `X.XK`
/// - Values below 1,000 are formatted as-is
///
/// Trailing zeros in the fraction are trimmed, so `2,000` renders as `2K`
/// rather than `2.0K`.
///
/// # Examples
/// ```
/// use aurapane_types::formatting::format_compact;
/// assert_eq!(format_compact(500), "500");
/// assert_eq!(format_compact(1_500), "1.5K");
/// assert_eq!(format_compact(2_000), "2K");
/// assert_eq!(format_compact(1_250_000), "1.25M");
/// assert_eq!(format_compact(3_000_000_000), "3B");
/// ```
pub fn format_compact(value: i64) -> String {
    if value >= 1_000_000_000 {
        trim_fraction(format!("{:.2}", value as f64 / 1_000_000_000.0)) + "B"
    } else if value >= 1_000_000 {
        trim_fraction(format!("{:.2}", value as f64 / 1_000_000.0)) + "M"
    } else if value >= 1_000 {
        trim_fraction(format!("{:.1}", value as f64 / 1_000.0)) + "K"
    } else {
        value.to_string()
    }
}

/// Format a non-negative f32 rate (DPS) compactly.
///
/// Negative inputs clamp to zero; the value is truncated to a whole number
/// before the compact suffix rules apply.
///
/// # Examples
/// ```
/// use aurapane_types::formatting::format_rate;
/// assert_eq!(format_rate(0.0), "0");
/// assert_eq!(format_rate(-12.0), "0");
/// assert_eq!(format_rate(1_520.7), "1.5K");
/// ```
pub fn format_rate(rate: f32) -> String {
    format_compact(rate.max(0.0) as i64)
}

/// Format a 0..=1 fraction as a whole percentage, e.g. `0.427` -> `"42%"`.
///
/// # Examples
/// ```
/// use aurapane_types::formatting::format_pct;
/// assert_eq!(format_pct(0.427), "42%");
/// assert_eq!(format_pct(1.0), "100%");
/// ```
pub fn format_pct(fraction: f32) -> String {
    format!("{}%", (fraction * 100.0) as i32)
}

/// Drop a trailing all-zero fraction ("2.00" -> "2", "1.50" -> "1.5").
fn trim_fraction(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
