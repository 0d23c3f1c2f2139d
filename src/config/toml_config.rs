use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PLANS: [&str; 4] = ["Starter", "Plus", "Pro", "Expert"];
pub const DEFAULT_PERIOD: &str = "/month";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub sink: SinkConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Capture file written by the page automation step.
    pub input: String,
    /// Copied verbatim into each row's `src`.
    pub src: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_plans")]
    pub plans: Vec<String>,
    #[serde(default = "default_period")]
    pub period: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            plans: default_plans(),
            period: default_period(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    pub webhook_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_seconds")]
    pub retry_delay_seconds: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_seconds: default_timeout_seconds(),
            retry_attempts: default_retry_attempts(),
            retry_delay_seconds: default_retry_delay_seconds(),
        }
    }
}

impl SinkConfig {
    /// Webhook URL, treating an unresolved `${VAR}` placeholder as missing.
    pub fn resolved_webhook_url(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && !url.contains("${"))
    }

    pub fn validate_for_delivery(&self) -> Result<()> {
        let resolved = self.resolved_webhook_url();
        let url = validation::validate_required_field("sink.webhook_url (SHEET_WEBHOOK)", &resolved)?;
        validation::validate_url("sink.webhook_url", url)?;
        validation::validate_positive_number(
            "sink.timeout_seconds",
            self.timeout_seconds as usize,
            1,
        )?;
        validation::validate_range("sink.retry_attempts", self.retry_attempts, 0, 10)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
}

fn default_plans() -> Vec<String> {
    DEFAULT_PLANS.iter().map(|s| s.to_string()).collect()
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    2
}

fn default_retry_delay_seconds() -> u64 {
    2
}

fn default_output_formats() -> Vec<String> {
    vec!["json".to_string(), "csv".to_string()]
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHEET_WEBHOOK})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use once_cell::sync::Lazy;
        use regex::Regex;
        static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性 (不含 webhook，乾跑時不需要)
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("source.input", &self.source.input)?;
        validation::validate_file_extension("source.input", &self.source.input, &["json"])?;
        validation::validate_non_empty_string("source.src", &self.source.src)?;
        validation::validate_plan_names("extract.plans", &self.extract.plans)?;
        validation::validate_non_empty_string("extract.period", &self.extract.period)?;

        if let Some(output_path) = &self.load.output_path {
            validation::validate_path("load.output_path", output_path)?;
        }
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_id(&self) -> &str {
        &self.source.src
    }

    fn plans(&self) -> &[String] {
        &self.extract.plans
    }

    fn period(&self) -> &str {
        &self.extract.period
    }

    fn output_path(&self) -> Option<&str> {
        self.load.output_path.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
