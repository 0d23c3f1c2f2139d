use crate::config::toml_config::SinkConfig;
use crate::core::{RecordSink, SheetRow};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::time::Duration;

/// POSTs the row array as JSON to a sheet webhook.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    url: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            retry_attempts: 0,
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Validates the settings first; a missing URL is a `MissingConfigError`.
    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        config.validate_for_delivery()?;
        let url = config
            .resolved_webhook_url()
            .ok_or_else(|| EtlError::MissingConfigError {
                field: "sink.webhook_url (SHEET_WEBHOOK)".to_string(),
            })?;
        Ok(Self::new(url, Duration::from_secs(config.timeout_seconds))?.with_retries(
            config.retry_attempts,
            Duration::from_secs(config.retry_delay_seconds),
        ))
    }

    pub fn with_retries(mut self, retry_attempts: u32, retry_delay: Duration) -> Self {
        self.retry_attempts = retry_attempts;
        self.retry_delay = retry_delay;
        self
    }

    async fn post_once(&self, rows: &[SheetRow]) -> Result<String> {
        let response = self.client.post(&self.url).json(rows).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(EtlError::SinkError {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Network failures and 5xx answers are worth another attempt; 4xx are not.
fn is_retryable(err: &EtlError) -> bool {
    match err {
        EtlError::ApiError(e) => !e.is_builder(),
        EtlError::SinkError { status, .. } => *status >= 500,
        _ => false,
    }
}

impl RecordSink for WebhookSink {
    async fn deliver(&self, rows: &[SheetRow]) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.post_once(rows).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retry_attempts && is_retryable(&e) => {
                    attempt += 1;
                    tracing::warn!(
                        "Webhook delivery failed ({}), retry {}/{} in {:?}",
                        e,
                        attempt,
                        self.retry_attempts,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Prints what would have been sent and delivers nothing.
#[derive(Debug, Clone, Default)]
pub struct DryRunSink;

impl RecordSink for DryRunSink {
    async fn deliver(&self, rows: &[SheetRow]) -> Result<String> {
        let json = serde_json::to_string_pretty(rows)?;
        tracing::info!("🔍 DRY RUN - rows not sent:\n{}", json);
        Ok(format!("dry run: {} row(s) not sent", rows.len()))
    }
}
