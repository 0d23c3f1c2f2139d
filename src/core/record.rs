use crate::core::resolver::Resolution;
use crate::domain::model::{ExtractionReport, PlanRecord, TermMention};

pub fn build_record(
    plan: &str,
    resolution: &Resolution,
    term: Option<TermMention>,
    period: &str,
) -> PlanRecord {
    PlanRecord {
        plan: plan.to_string(),
        introductory_price: resolution.introductory_price().map(str::to_string),
        term_months: term.map(|t| t.months),
        standard_price: resolution.standard_price().map(str::to_string),
        period: period.to_string(),
    }
}

/// Collects per-plan outcomes in plan order and keeps only valid records.
#[derive(Debug, Default)]
pub struct RecordSetBuilder {
    report: ExtractionReport,
}

impl RecordSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(&mut self, plan: &str) {
        tracing::warn!("No card text captured for plan {}", plan);
        self.report.skipped.push(plan.to_string());
    }

    pub fn push(&mut self, record: PlanRecord) {
        if record.is_valid() {
            self.report.records.push(record);
        } else {
            tracing::warn!("No price resolved for plan {}", record.plan);
            self.report.invalid.push(record.plan);
        }
    }

    pub fn finish(self) -> ExtractionReport {
        self.report
    }
}
