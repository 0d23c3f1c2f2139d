use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Webhook request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No prices parsed for any of {plans} plan(s)")]
    NoPricesParsed { plans: usize },

    #[error("Sink rejected delivery with status {status}: {body}")]
    SinkError { status: u16, body: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Extraction,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::SinkError { .. } => ErrorCategory::Network,
            EtlError::IoError(_) | EtlError::CsvError(_) => ErrorCategory::Storage,
            EtlError::SerializationError(_)
            | EtlError::NoPricesParsed { .. }
            | EtlError::ProcessingError { .. } => ErrorCategory::Extraction,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::ApiError(_) | EtlError::SinkError { .. } => ErrorSeverity::Medium,
            EtlError::NoPricesParsed { .. } | EtlError::ProcessingError { .. } => {
                ErrorSeverity::High
            }
            EtlError::SerializationError(_) | EtlError::CsvError(_) => ErrorSeverity::High,
            EtlError::IoError(_) => ErrorSeverity::Critical,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 程序退出碼：2 = 沒有解析到價格，3 = 缺少 webhook 設定，4 = 投遞失敗
    pub fn exit_code(&self) -> i32 {
        match self {
            EtlError::NoPricesParsed { .. } => 2,
            EtlError::MissingConfigError { field } if field.contains("webhook") => 3,
            EtlError::ApiError(_) | EtlError::SinkError { .. } => 4,
            _ => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check network connectivity and that the webhook URL is reachable",
            EtlError::SinkError { .. } => "Check the webhook deployment and its access settings",
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check that the paths exist and are readable/writable"
            }
            EtlError::SerializationError(_) => {
                "Check that the capture file is a JSON object of plan name to text"
            }
            EtlError::NoPricesParsed { .. } => {
                "The page text probably changed; inspect the capture file and the plan names"
            }
            EtlError::ProcessingError { .. } => "Re-run with --verbose to see per-plan decisions",
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => "Fix the configuration value and retry",
            EtlError::MissingConfigError { .. } => {
                "Provide the missing value via flag, config file or environment variable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::NoPricesParsed { .. } => {
                "No prices parsed: possible markup or text change.".to_string()
            }
            EtlError::MissingConfigError { field } if field.contains("webhook") => {
                "Missing SHEET_WEBHOOK env var.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_failure_kind() {
        assert_eq!(EtlError::NoPricesParsed { plans: 4 }.exit_code(), 2);
        assert_eq!(
            EtlError::MissingConfigError {
                field: "sink.webhook_url".to_string()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            EtlError::SinkError {
                status: 500,
                body: "boom".to_string()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            EtlError::ConfigError {
                message: "bad".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_category_and_severity() {
        let err = EtlError::NoPricesParsed { plans: 2 };
        assert_eq!(err.category(), ErrorCategory::Extraction);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("No prices parsed"));
    }
}
