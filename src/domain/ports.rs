use crate::domain::model::{ExtractionReport, LoadSummary, PlanTexts, SheetRow};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Opaque identifier copied into every row's `src`.
    fn source_id(&self) -> &str;
    fn plans(&self) -> &[String];
    fn period(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];
}

/// Supplies per-plan card text captured by the page automation step.
pub trait TextSource: Send + Sync {
    fn plan_texts(&self) -> impl std::future::Future<Output = Result<PlanTexts>> + Send;
}

/// Accepts the final row set; returns the sink's response body.
pub trait RecordSink: Send + Sync {
    fn deliver(&self, rows: &[SheetRow])
        -> impl std::future::Future<Output = Result<String>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<PlanTexts>;
    async fn transform(&self, texts: PlanTexts) -> Result<ExtractionReport>;
    async fn load(&self, report: ExtractionReport) -> Result<LoadSummary>;
}
