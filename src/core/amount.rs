//! Canonical parse and display of monetary amounts.
//!
//! Every amount the engine emits goes through [`format_amount`], so a
//! displayed amount always parses back to the value it was rendered from.

use once_cell::sync::Lazy;
use regex::Regex;

/// Amount sub-pattern shared by the scanner and the renewal detector.
/// Comma-grouped thousands are tried first so `1,299` is never read as `1,29`.
pub const AMOUNT_PATTERN: &str = r"\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:[.,]\d{1,2})?";

/// Unit words accepted after the separator; all normalized to `month`.
pub const UNIT_PATTERN: &str = r"(?:month(?:s|ly)?|mths?|mo)\b";

static GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?$").unwrap());
static PLAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:[.,]\d{1,2})?$").unwrap());

/// Parse an amount such as `10`, `10.50`, `10,50` or `1,299.99`.
///
/// Returns `None` for anything the canonical rule does not accept, including
/// non-finite results. Callers drop such tokens.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let normalized = if GROUPED.is_match(&compact) {
        compact.replace(',', "")
    } else if PLAIN.is_match(&compact) {
        compact.replace(',', ".")
    } else {
        return None;
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whole amounts render without decimals, everything else with two.
pub fn format_amount(value: f64) -> String {
    let cents = (value * 100.0).round();
    if cents % 100.0 == 0.0 {
        format!("{:.0}", cents / 100.0)
    } else {
        format!("{:.2}", cents / 100.0)
    }
}

/// Display string of a per-month price, e.g. `£10/month`.
pub fn display_price(symbol: &str, value: f64) -> String {
    format!("{}{}/month", symbol, format_amount(value))
}
