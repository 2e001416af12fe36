//! Text cleanup helpers for spreadsheet-exported values.

/// Trim and collapse whitespace runs to single ASCII spaces.
/// Unicode whitespace (NBSP, narrow NBSP, ...) counts as whitespace here.
pub fn norm_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text, or `None` when nothing is left.
pub fn non_empty(s: &str) -> Option<String> {
    let n = norm_spaces(s);
    if n.is_empty() { None } else { Some(n) }
}

/// Parse an hours cell. Thousands separators and surrounding whitespace are
/// tolerated; anything that is not a finite, non-negative number is `None`.
pub fn parse_hours(s: &str) -> Option<f64> {
    let cleaned: String = norm_spaces(s).chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite() && *h >= 0.0)
}

/// Hours rendered for terminal tables (`4.5`, `8`).
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}")
    } else {
        format!("{hours}")
    }
}
