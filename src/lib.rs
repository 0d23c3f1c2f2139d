pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::adapters::{
    capture::CaptureFileSource,
    webhook::{DryRunSink, WebhookSink},
};
pub use crate::core::{etl::EtlEngine, extractor::PriceExtractor, pipeline::PricingPipeline};
pub use crate::domain::model::{ExtractionReport, PlanRecord, SheetRow};
pub use crate::utils::error::{EtlError, Result};
