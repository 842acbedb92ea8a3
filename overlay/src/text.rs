//! Width-constrained text fitting

use aurapane_core::TextMetrics;

const ELLIPSIS: &str = "…";

/// Truncate `text` with a trailing ellipsis so it fits `max_width`.
///
/// Returns the text unchanged when it already fits. Otherwise binary
/// searches over prefix lengths for the longest prefix whose rendered width
/// (including the ellipsis) still fits. A non-positive width yields an
/// empty string.
pub fn ellipsize_to_width<M: TextMetrics>(
    metrics: &mut M,
    text: &str,
    max_width: f32,
    scale: f32,
) -> String {
    if max_width <= 0.0 {
        return String::new();
    }
    if metrics.measure_width(text, scale) <= max_width {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut low = 0usize;
    let mut high = chars.len();
    let mut best = String::new();

    while low <= high {
        let mid = (low + high) / 2;
        let mut candidate: String = chars[..mid].iter().collect();
        candidate.push_str(ELLIPSIS);
        if metrics.measure_width(&candidate, scale) <= max_width {
            best = candidate;
            low = mid + 1;
        } else {
            if mid == 0 {
                break;
            }
            high = mid - 1;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurapane_core::metrics::MonospaceMetrics;

    // 7px per char at scale 1.0.
    fn metrics() -> MonospaceMetrics {
        MonospaceMetrics::default()
    }

    #[test]
    fn fits_unchanged() {
        let mut m = metrics();
        assert_eq!(ellipsize_to_width(&mut m, "abc", 21.0, 1.0), "abc");
    }

    #[test]
    fn truncates_with_ellipsis() {
        let mut m = metrics();
        // 5 chars fit: 4 prefix chars + ellipsis = 35px.
        assert_eq!(ellipsize_to_width(&mut m, "abcdefgh", 35.0, 1.0), "abcd…");
    }

    #[test]
    fn maximizes_prefix_length() {
        let mut m = metrics();
        // 7 slots: 6 prefix + ellipsis.
        assert_eq!(ellipsize_to_width(&mut m, "abcdefgh", 49.0, 1.0), "abcdef…");
    }

    #[test]
    fn non_positive_width_is_empty() {
        let mut m = metrics();
        assert_eq!(ellipsize_to_width(&mut m, "abc", 0.0, 1.0), "");
        assert_eq!(ellipsize_to_width(&mut m, "abc", -5.0, 1.0), "");
    }

    #[test]
    fn width_too_small_for_ellipsis_is_empty() {
        let mut m = metrics();
        assert_eq!(ellipsize_to_width(&mut m, "abcdefgh", 3.0, 1.0), "");
    }

    #[test]
    fn respects_scale() {
        let mut m = metrics();
        // At 2x scale each char is 14px; "ab" + ellipsis = 42px.
        assert_eq!(ellipsize_to_width(&mut m, "abcdefgh", 42.0, 2.0), "ab…");
    }

    #[test]
    fn handles_multibyte_text() {
        let mut m = metrics();
        let fitted = ellipsize_to_width(&mut m, "åéîøü-name", 35.0, 1.0);
        assert_eq!(fitted, "åéîø…");
    }
}
