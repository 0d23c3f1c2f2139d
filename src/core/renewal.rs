use crate::core::amount::{display_price, parse_amount, AMOUNT_PATTERN, UNIT_PATTERN};
use crate::domain::model::PriceToken;
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest run of qualifier text allowed between the amount and its period.
/// The gap may not cross a currency symbol.
pub const MAX_RENEWAL_GAP: usize = 40;

static RENEWAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:then\s+only|thereafter|then|after\s+that|afterwards|renews\s+at)\s+(?P<symbol>[£$€])\s*(?P<amount>{amount})[^£$€]{{0,{gap}}}?(?:/|\b(?:per|a)\b)\s*{unit}",
        gap = MAX_RENEWAL_GAP,
        amount = AMOUNT_PATTERN,
        unit = UNIT_PATTERN,
    ))
    .unwrap()
});

/// The price stated by an explicit post-promotion sentence such as
/// "Then only £10/month" or "Thereafter £12 excl. VAT/month".
///
/// The first such sentence is used. When present, its price is the standard
/// price no matter what the resolver infers.
pub fn detect_explicit_renewal(text: &str) -> Option<PriceToken> {
    RENEWAL_PATTERN.captures_iter(text).find_map(|caps| {
        let symbol = caps.name("symbol")?;
        let value = parse_amount(caps.name("amount")?.as_str())?;
        Some(PriceToken {
            amount_text: display_price(symbol.as_str(), value),
            amount_value: value,
            offset: symbol.start(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renewal(text: &str) -> Option<String> {
        detect_explicit_renewal(text).map(|t| t.amount_text)
    }

    #[test]
    fn test_lead_in_variants() {
        assert_eq!(renewal("£6/month Then only £10/month").as_deref(), Some("£10/month"));
        assert_eq!(renewal("£6/month. Thereafter £12/month").as_deref(), Some("£12/month"));
        assert_eq!(renewal("£6/month, then £14 per month").as_deref(), Some("£14/month"));
        assert_eq!(renewal("£6/month. After that £9/month").as_deref(), Some("£9/month"));
        assert_eq!(renewal("£6/month, renews at £8 a month").as_deref(), Some("£8/month"));
    }

    #[test]
    fn test_qualifier_between_amount_and_period() {
        assert_eq!(
            renewal("Then only £10 excl. VAT/month").as_deref(),
            Some("£10/month")
        );
    }

    #[test]
    fn test_lead_in_must_touch_the_amount() {
        assert_eq!(renewal("Then pay £10/month"), None);
        assert_eq!(renewal("Then\n  £10/month").as_deref(), Some("£10/month"));
    }

    #[test]
    fn test_ordinary_then_does_not_hide_later_renewal() {
        let text = "Sign up then pay £1/month for 12 months. Renews at £5/month";
        assert_eq!(renewal(text).as_deref(), Some("£5/month"));
    }

    #[test]
    fn test_period_gap_is_bounded() {
        let far = format!("Then £10 {}/month", "x".repeat(MAX_RENEWAL_GAP + 5));
        assert_eq!(renewal(&far), None);

        let near = format!("Then £10 {}/month", "x".repeat(10));
        assert_eq!(renewal(&near).as_deref(), Some("£10/month"));
    }

    #[test]
    fn test_period_gap_does_not_cross_another_price() {
        // A one-off fee; the monthly price belongs to a different sentence.
        assert_eq!(renewal("Then £5 setup fee. Also £10/month"), None);
    }

    #[test]
    fn test_no_lead_in() {
        assert_eq!(renewal("Pro £8/month £15/month"), None);
        assert_eq!(renewal("Authentic £8/month"), None);
    }

    #[test]
    fn test_offset_points_at_currency_symbol() {
        let text = "Then only £10/month";
        let token = detect_explicit_renewal(text).unwrap();
        assert_eq!(&text[token.offset..token.offset + '£'.len_utf8()], "£");
    }
}
