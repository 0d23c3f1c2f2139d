use crate::core::Pipeline;
use crate::domain::model::LoadSummary;
use crate::utils::error::{EtlError, Result};
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract → transform → load. A run that resolves no price for any plan
    /// stops before load so the sink never receives an empty row set.
    pub async fn run(&self) -> Result<LoadSummary> {
        let started = Instant::now();
        tracing::info!("Starting price extraction run");

        // Extract
        let texts = self.pipeline.extract().await?;
        tracing::info!("Captured card text for {} plan(s)", texts.len());

        // Transform
        let report = self.pipeline.transform(texts).await?;
        tracing::info!(
            "Resolved {} valid record(s), {} skipped, {} without price",
            report.records.len(),
            report.skipped.len(),
            report.invalid.len()
        );

        if report.is_empty() {
            return Err(EtlError::NoPricesParsed {
                plans: report.plans_seen(),
            });
        }

        // Load
        let summary = self.pipeline.load(report).await?;
        tracing::info!(
            "Delivered {} row(s) in {:?}",
            summary.rows_delivered,
            started.elapsed()
        );

        Ok(summary)
    }
}
