use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plan name to the collapsed visible text of that plan's pricing card.
pub type PlanTexts = HashMap<String, String>;

/// A located monetary-per-period mention, e.g. `£10/month` at byte 8.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceToken {
    pub amount_text: String,
    pub amount_value: f64,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMention {
    pub months: u32,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub plan: String,
    pub introductory_price: Option<String>,
    pub term_months: Option<u32>,
    pub standard_price: Option<String>,
    pub period: String,
}

impl PlanRecord {
    pub fn is_valid(&self) -> bool {
        self.introductory_price.is_some() || self.standard_price.is_some()
    }

    pub fn to_row(&self, src: &str) -> SheetRow {
        SheetRow {
            plan: self.plan.clone(),
            introductory_offer: self.introductory_price.clone().unwrap_or_default(),
            duration: self.term_months.map(format_duration).unwrap_or_default(),
            standard_price: self.standard_price.clone().unwrap_or_default(),
            period: self.period.clone(),
            src: src.to_string(),
        }
    }
}

pub fn format_duration(months: u32) -> String {
    if months == 1 {
        "1 month".to_string()
    } else {
        format!("{} months", months)
    }
}

/// Flat row shape accepted by the sheet webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub plan: String,
    pub introductory_offer: String,
    pub duration: String,
    pub standard_price: String,
    pub period: String,
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub records: Vec<PlanRecord>,
    /// Plans with no captured text.
    pub skipped: Vec<String>,
    /// Plans whose text yielded no price at all.
    pub invalid: Vec<String>,
}

impl ExtractionReport {
    pub fn plans_seen(&self) -> usize {
        self.records.len() + self.skipped.len() + self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self, src: &str) -> Vec<SheetRow> {
        self.records.iter().map(|r| r.to_row(src)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_delivered: usize,
    pub sink_response: Option<String>,
    pub snapshot_files: Vec<String>,
}
