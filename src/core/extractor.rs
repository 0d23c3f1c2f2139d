use crate::core::record::{build_record, RecordSetBuilder};
use crate::core::renewal::detect_explicit_renewal;
use crate::core::resolver::{resolve, Evidence, Resolution};
use crate::core::scanner::{scan_prices, scan_terms};
use crate::core::term::resolve_term;
use crate::domain::model::{ExtractionReport, PlanRecord, PlanTexts, PriceToken, TermMention};

/// Everything found in one plan's text, kept for auditing a decision.
#[derive(Debug, Clone)]
pub struct PlanAnalysis {
    pub tokens: Vec<PriceToken>,
    pub term: Option<TermMention>,
    pub renewal: Option<PriceToken>,
    pub resolution: Resolution,
}

/// Turns plan card text into pricing records. Stateless between calls.
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    period: String,
}

impl PriceExtractor {
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
        }
    }

    pub fn analyse(&self, text: &str) -> PlanAnalysis {
        let tokens = scan_prices(text);
        let term = resolve_term(&scan_terms(text));
        let renewal = detect_explicit_renewal(text);
        let resolution = resolve(&Evidence {
            tokens: &tokens,
            term,
            renewal: renewal.as_ref(),
        });

        PlanAnalysis {
            tokens,
            term,
            renewal,
            resolution,
        }
    }

    /// Record for a single plan. May be invalid; see [`PlanRecord::is_valid`].
    pub fn extract_plan(&self, plan: &str, text: &str) -> PlanRecord {
        let analysis = self.analyse(text);

        tracing::debug!(
            plan,
            tokens = ?analysis.tokens.iter().map(|t| t.amount_text.as_str()).collect::<Vec<_>>(),
            term_months = ?analysis.term.map(|t| t.months),
            renewal = ?analysis.renewal.as_ref().map(|t| t.amount_text.as_str()),
            intro_rule = ?analysis.resolution.introductory.as_ref().map(|d| d.rule),
            standard_rule = ?analysis.resolution.standard.as_ref().map(|d| d.rule),
            "resolved plan pricing"
        );

        build_record(plan, &analysis.resolution, analysis.term, &self.period)
    }

    /// Records for `plans`, in that order. Plans with no (or blank) text are
    /// skipped; plans without any price are reported invalid.
    pub fn extract_all(&self, plans: &[String], texts: &PlanTexts) -> ExtractionReport {
        let mut builder = RecordSetBuilder::new();

        for plan in plans {
            match lookup_text(texts, plan) {
                Some(text) => builder.push(self.extract_plan(plan, text)),
                None => builder.skip(plan),
            }
        }

        builder.finish()
    }
}

/// Exact key first, then a case-insensitive match.
fn lookup_text<'a>(texts: &'a PlanTexts, plan: &str) -> Option<&'a str> {
    texts
        .get(plan)
        .or_else(|| {
            texts
                .iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case(plan))
                .min_by(|a, b| a.0.cmp(b.0))
                .map(|(_, text)| text)
        })
        .map(String::as_str)
        .filter(|text| !text.trim().is_empty())
}
