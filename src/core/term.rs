use crate::domain::model::TermMention;

/// Introductory term of a plan: the first "for N months" phrase only.
///
/// A second statement is ignored rather than merged. A first statement of
/// zero months counts as no term.
pub fn resolve_term(mentions: &[TermMention]) -> Option<TermMention> {
    mentions.first().copied().filter(|t| t.months > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::scan_terms;

    #[test]
    fn test_first_term_wins() {
        let term = resolve_term(&scan_terms("£1/month for 6 months, or £2/month for 24 months"));
        assert_eq!(term.map(|t| t.months), Some(6));
    }

    #[test]
    fn test_absent_term() {
        assert_eq!(resolve_term(&scan_terms("£1/month, cancel any time")), None);
    }

    #[test]
    fn test_zero_months_is_absent() {
        assert_eq!(resolve_term(&scan_terms("for 0 months then for 3 months")), None);
    }
}
