use crate::core::extractor::PriceExtractor;
use crate::core::{ConfigProvider, Pipeline, RecordSink, Storage, TextSource};
use crate::domain::model::{ExtractionReport, LoadSummary, PlanTexts, SheetRow};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;

pub const JSON_SNAPSHOT: &str = "prices.json";
pub const CSV_SNAPSHOT: &str = "prices.csv";

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    extracted_at: String,
    src: &'a str,
    rows: &'a [SheetRow],
}

/// Card text in, sheet rows out.
pub struct PricingPipeline<T: TextSource, K: RecordSink, S: Storage, C: ConfigProvider> {
    source: T,
    sink: K,
    storage: S,
    config: C,
    extractor: PriceExtractor,
}

impl<T: TextSource, K: RecordSink, S: Storage, C: ConfigProvider> PricingPipeline<T, K, S, C> {
    pub fn new(source: T, sink: K, storage: S, config: C) -> Self {
        let extractor = PriceExtractor::new(config.period());
        Self {
            source,
            sink,
            storage,
            config,
            extractor,
        }
    }

    async fn write_snapshot(&self, rows: &[SheetRow]) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            match format.as_str() {
                "json" => {
                    let snapshot = Snapshot {
                        extracted_at: chrono::Utc::now().to_rfc3339(),
                        src: self.config.source_id(),
                        rows,
                    };
                    let data = serde_json::to_vec_pretty(&snapshot)?;
                    self.storage.write_file(JSON_SNAPSHOT, &data).await?;
                    written.push(JSON_SNAPSHOT.to_string());
                }
                "csv" => {
                    let data = rows_to_csv(rows)?;
                    self.storage.write_file(CSV_SNAPSHOT, &data).await?;
                    written.push(CSV_SNAPSHOT.to_string());
                }
                other => {
                    return Err(EtlError::ProcessingError {
                        message: format!("Unsupported snapshot format: {}", other),
                    })
                }
            }
        }

        Ok(written)
    }
}

pub fn rows_to_csv(rows: &[SheetRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| EtlError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<T, K, S, C> Pipeline for PricingPipeline<T, K, S, C>
where
    T: TextSource,
    K: RecordSink,
    S: Storage,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<PlanTexts> {
        let texts = self.source.plan_texts().await?;
        tracing::debug!("Capture holds text for: {:?}", texts.keys().collect::<Vec<_>>());
        Ok(texts)
    }

    async fn transform(&self, texts: PlanTexts) -> Result<ExtractionReport> {
        Ok(self.extractor.extract_all(self.config.plans(), &texts))
    }

    async fn load(&self, report: ExtractionReport) -> Result<LoadSummary> {
        let rows = report.rows(self.config.source_id());

        let snapshot_files = if self.config.output_path().is_some() {
            self.write_snapshot(&rows).await?
        } else {
            Vec::new()
        };

        tracing::info!("Sending {} row(s) to sink", rows.len());
        let response = self.sink.deliver(&rows).await?;
        tracing::info!("Sink: {}", response);

        Ok(LoadSummary {
            rows_delivered: rows.len(),
            sink_response: Some(response),
            snapshot_files,
        })
    }
}
