pub mod amount;
pub mod etl;
pub mod extractor;
pub mod pipeline;
pub mod record;
pub mod renewal;
pub mod resolver;
pub mod scanner;
pub mod term;

pub use crate::domain::model::{ExtractionReport, LoadSummary, PlanRecord, PlanTexts, SheetRow};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordSink, Storage, TextSource};
pub use crate::utils::error::Result;
