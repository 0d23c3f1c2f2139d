pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::SinkConfig;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "price-etl")]
#[command(about = "Extract plan prices from captured page text and send them to a sheet webhook")]
pub struct CliConfig {
    /// Capture file (JSON object of plan name to card text)
    #[arg(long, default_value = "capture.json")]
    pub input: String,

    #[arg(long, value_delimiter = ',', default_values = ["Starter", "Plus", "Pro", "Expert"])]
    pub plans: Vec<String>,

    /// Copied into every row's `src` field
    #[arg(long, default_value = "https://www.ionos.co.uk/websites/website-builder")]
    pub source_id: String,

    #[arg(long, default_value = "/month")]
    pub period: String,

    #[arg(long, env = "SHEET_WEBHOOK")]
    pub webhook_url: Option<String>,

    /// Directory for prices.json / prices.csv snapshots
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', default_values = ["json", "csv"])]
    pub output_formats: Vec<String>,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "2")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "2")]
    pub retry_delay_seconds: u64,

    #[arg(long, help = "Print rows instead of sending them")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            webhook_url: self.webhook_url.clone(),
            timeout_seconds: self.timeout_seconds,
            retry_attempts: self.retry_attempts,
            retry_delay_seconds: self.retry_delay_seconds,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn plans(&self) -> &[String] {
        &self.plans
    }

    fn period(&self) -> &str {
        &self.period
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension("input", &self.input, &["json"])?;
        validation::validate_plan_names("plans", &self.plans)?;
        validation::validate_non_empty_string("source_id", &self.source_id)?;
        validation::validate_non_empty_string("period", &self.period)?;

        if let Some(output_path) = &self.output_path {
            validation::validate_path("output_path", output_path)?;
        }
        validation::validate_output_formats("output_formats", &self.output_formats)?;

        if !self.dry_run {
            self.sink_config().validate_for_delivery()?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["price-etl", "--dry-run"]);

        assert_eq!(config.plans, vec!["Starter", "Plus", "Pro", "Expert"]);
        assert_eq!(config.period(), "/month");
        assert_eq!(config.output_formats, vec!["json", "csv"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_plan_list() {
        let config = CliConfig::parse_from([
            "price-etl",
            "--dry-run",
            "--plans",
            "Basic,Premium",
        ]);
        assert_eq!(config.plans(), &["Basic".to_string(), "Premium".to_string()]);
    }

    #[test]
    fn test_cli_requires_webhook_unless_dry_run() {
        let mut config = CliConfig::parse_from(["price-etl", "--dry-run"]);
        config.dry_run = false;
        config.webhook_url = None;

        let err = config.validate().unwrap_err();
        assert_eq!(err.exit_code(), 3);

        config.webhook_url = Some("https://hooks.example.test/exec".to_string());
        assert!(config.validate().is_ok());
    }
}
