use crate::core::amount::{display_price, parse_amount, AMOUNT_PATTERN, UNIT_PATTERN};
use crate::domain::model::{PriceToken, TermMention};
use once_cell::sync::Lazy;
use regex::Regex;

static PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<symbol>[£$€])\s*(?P<amount>{})(?:\s*/\s*|\s+(?:per|a)\s+){}",
        AMOUNT_PATTERN, UNIT_PATTERN
    ))
    .unwrap()
});

static TERM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfor\s+(?P<months>\d+)\s+months?\b").unwrap());

/// All per-month price mentions in `text`, ordered by offset.
///
/// Repeated identical prices stay separate tokens; their positions matter to
/// the resolver. Amounts that fail the canonical parse are dropped here.
pub fn scan_prices(text: &str) -> Vec<PriceToken> {
    PRICE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let symbol = caps.name("symbol")?.as_str();
            let value = parse_amount(caps.name("amount")?.as_str())?;
            Some(PriceToken {
                amount_text: display_price(symbol, value),
                amount_value: value,
                offset: whole.start(),
            })
        })
        .collect()
}

/// Every "for N month(s)" phrase in `text`. `months` is unchecked here;
/// counts that do not fit a `u32` are skipped.
pub fn scan_terms(text: &str) -> Vec<TermMention> {
    TERM_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let months = caps.name("months")?.as_str().parse::<u32>().ok()?;
            Some(TermMention {
                months,
                offset: whole.start(),
            })
        })
        .collect()
}
