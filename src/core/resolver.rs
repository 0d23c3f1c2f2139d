//! Assigns price tokens to the introductory and standard fields.
//!
//! Resolution is an ordered table of rules. Each rule is a pure function of
//! the evidence and the partial result built so far; it either fires and
//! returns an updated result or leaves it untouched. The explicit renewal
//! rule runs last and overwrites the standard price unconditionally.

use crate::domain::model::{PriceToken, TermMention};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Nearest price at or before the "for N months" phrase is the intro.
    TermAnchored,
    /// No anchored intro: cheapest is intro, dearest is standard.
    MagnitudeOrder,
    /// Anchored intro without a renewal sentence: dearest other price.
    SecondPriceBackfill,
    /// "Then only £X/month" and friends.
    ExplicitRenewal,
}

pub const RULES: [Rule; 4] = [
    Rule::TermAnchored,
    Rule::MagnitudeOrder,
    Rule::SecondPriceBackfill,
    Rule::ExplicitRenewal,
];

/// Everything the scanner, term resolver and renewal detector found.
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub tokens: &'a [PriceToken],
    pub term: Option<TermMention>,
    pub renewal: Option<&'a PriceToken>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub token: PriceToken,
    pub rule: Rule,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub introductory: Option<Decision>,
    pub standard: Option<Decision>,
}

impl Resolution {
    pub fn introductory_price(&self) -> Option<&str> {
        self.introductory.as_ref().map(|d| d.token.amount_text.as_str())
    }

    pub fn standard_price(&self) -> Option<&str> {
        self.standard.as_ref().map(|d| d.token.amount_text.as_str())
    }
}

impl Rule {
    /// Returns the updated result when the rule fires, `None` otherwise.
    pub fn apply(self, evidence: &Evidence<'_>, partial: &Resolution) -> Option<Resolution> {
        match self {
            Rule::TermAnchored => {
                if partial.introductory.is_some() {
                    return None;
                }
                let term = evidence.term?;
                let nearest = evidence
                    .tokens
                    .iter()
                    .filter(|t| t.offset <= term.offset)
                    .max_by_key(|t| t.offset)?;
                Some(Resolution {
                    introductory: Some(self.decide(nearest)),
                    standard: partial.standard.clone(),
                })
            }
            Rule::MagnitudeOrder => {
                if partial.introductory.is_some() {
                    return None;
                }
                let cheapest = extreme(evidence.tokens.iter(), Ordering::Less)?;
                let standard = if evidence.tokens.len() >= 2 {
                    extreme(evidence.tokens.iter(), Ordering::Greater).map(|t| self.decide(t))
                } else {
                    partial.standard.clone()
                };
                Some(Resolution {
                    introductory: Some(self.decide(cheapest)),
                    standard,
                })
            }
            Rule::SecondPriceBackfill => {
                let intro = partial.introductory.as_ref()?;
                if intro.rule != Rule::TermAnchored
                    || partial.standard.is_some()
                    || evidence.renewal.is_some()
                {
                    return None;
                }
                let others = evidence
                    .tokens
                    .iter()
                    .filter(|t| t.amount_text != intro.token.amount_text);
                let dearest = extreme(others, Ordering::Greater)?;
                Some(Resolution {
                    introductory: partial.introductory.clone(),
                    standard: Some(self.decide(dearest)),
                })
            }
            Rule::ExplicitRenewal => {
                let renewal = evidence.renewal?;
                Some(Resolution {
                    introductory: partial.introductory.clone(),
                    standard: Some(self.decide(renewal)),
                })
            }
        }
    }

    fn decide(self, token: &PriceToken) -> Decision {
        Decision {
            token: token.clone(),
            rule: self,
        }
    }
}

/// Run every rule in order over the evidence.
pub fn resolve(evidence: &Evidence<'_>) -> Resolution {
    RULES.iter().fold(Resolution::default(), |partial, rule| {
        rule.apply(evidence, &partial).unwrap_or(partial)
    })
}

/// Smallest (`Less`) or largest (`Greater`) amount; ties keep the left-most
/// token, assuming `tokens` arrive in offset order.
fn extreme<'a>(
    tokens: impl Iterator<Item = &'a PriceToken>,
    wanted: Ordering,
) -> Option<&'a PriceToken> {
    tokens.fold(None, |best, candidate| match best {
        Some(current)
            if candidate.amount_value.total_cmp(&current.amount_value) != wanted =>
        {
            Some(current)
        }
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{renewal::detect_explicit_renewal, scanner, term::resolve_term};

    fn resolve_text(text: &str) -> Resolution {
        let tokens = scanner::scan_prices(text);
        let term = resolve_term(&scanner::scan_terms(text));
        let renewal = detect_explicit_renewal(text);
        resolve(&Evidence {
            tokens: &tokens,
            term,
            renewal: renewal.as_ref(),
        })
    }

    fn token(amount: f64, offset: usize) -> PriceToken {
        PriceToken {
            amount_text: format!("£{}/month", amount),
            amount_value: amount,
            offset,
        }
    }

    #[test]
    fn test_term_anchored_with_explicit_renewal() {
        let res = resolve_text("Starter £6/month for 6 months Then only £10/month");
        assert_eq!(res.introductory_price(), Some("£6/month"));
        assert_eq!(res.standard_price(), Some("£10/month"));
        assert_eq!(res.introductory.unwrap().rule, Rule::TermAnchored);
        assert_eq!(res.standard.unwrap().rule, Rule::ExplicitRenewal);
    }

    #[test]
    fn test_nearest_preceding_price_is_intro() {
        let res = resolve_text("was £9/month now £4/month for 3 months, £12/month");
        assert_eq!(res.introductory_price(), Some("£4/month"));
        let standard = res.standard.unwrap();
        assert_eq!(standard.rule, Rule::SecondPriceBackfill);
        assert_eq!(standard.token.amount_text, "£12/month");
    }

    #[test]
    fn test_no_term_orders_by_magnitude() {
        let res = resolve_text("Pro £15/month £8/month");
        assert_eq!(res.introductory_price(), Some("£8/month"));
        assert_eq!(res.standard_price(), Some("£15/month"));
        assert_eq!(res.introductory.unwrap().rule, Rule::MagnitudeOrder);
    }

    #[test]
    fn test_single_token_is_intro_only() {
        let res = resolve_text("Plus £5/month");
        assert_eq!(res.introductory_price(), Some("£5/month"));
        assert_eq!(res.standard, None);
    }

    #[test]
    fn test_term_before_any_price_falls_through() {
        let res = resolve_text("Offer for 12 months: £1/month then £7/month");
        assert_eq!(res.introductory.as_ref().unwrap().rule, Rule::MagnitudeOrder);
        assert_eq!(res.introductory_price(), Some("£1/month"));
        assert_eq!(res.standard_price(), Some("£7/month"));
    }

    #[test]
    fn test_explicit_renewal_overrides_magnitude() {
        // Magnitude ordering alone would pick £20 as the standard price.
        let res = resolve_text("£1/month £20/month Thereafter £9/month");
        assert_eq!(res.introductory_price(), Some("£1/month"));
        assert_eq!(res.standard_price(), Some("£9/month"));
    }

    #[test]
    fn test_backfill_skipped_when_only_same_amount() {
        let res = resolve_text("£3/month for 12 months, regular £3/month");
        assert_eq!(res.introductory_price(), Some("£3/month"));
        assert_eq!(res.standard, None);
    }

    #[test]
    fn test_no_tokens_resolves_nothing() {
        let res = resolve_text("Expert plan, call us for 12 months of support");
        assert_eq!(res, Resolution::default());
    }

    #[test]
    fn test_ties_prefer_leftmost() {
        let tokens = vec![token(5.0, 0), token(5.0, 10), token(9.0, 20), token(9.0, 30)];
        let res = resolve(&Evidence {
            tokens: &tokens,
            term: None,
            renewal: None,
        });
        assert_eq!(res.introductory.unwrap().token.offset, 0);
        assert_eq!(res.standard.unwrap().token.offset, 20);
    }

    #[test]
    fn test_rules_are_ordered() {
        assert_eq!(RULES.first(), Some(&Rule::TermAnchored));
        assert_eq!(RULES.last(), Some(&Rule::ExplicitRenewal));
    }
}
