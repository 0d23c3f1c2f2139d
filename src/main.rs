use clap::Parser;
use price_etl::core::{ConfigProvider, LoadSummary, RecordSink};
use price_etl::utils::{logger, validation::Validate};
use price_etl::{
    CaptureFileSource, CliConfig, DryRunSink, EtlEngine, EtlError, LocalStorage, PricingPipeline,
    WebhookSink,
};

async fn run<K: RecordSink>(config: CliConfig, sink: K) -> price_etl::Result<LoadSummary> {
    let source = CaptureFileSource::new(LocalStorage::new(".".to_string()), config.input.clone());
    let storage = LocalStorage::new(config.output_path().unwrap_or(".").to_string());
    let pipeline = PricingPipeline::new(source, sink, storage, config);

    EtlEngine::new(pipeline).run().await
}

fn exit_with(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Price extraction failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting price-etl CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let result = if config.dry_run {
        run(config, DryRunSink).await
    } else {
        match WebhookSink::from_config(&config.sink_config()) {
            Ok(sink) => run(config, sink).await,
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(summary) => {
            tracing::info!("✅ Delivered {} row(s)", summary.rows_delivered);
            for file in &summary.snapshot_files {
                tracing::info!("📁 Snapshot saved: {}", file);
            }
            if let Some(response) = summary.sink_response {
                println!("Sheet: {}", response);
            }
        }
        Err(e) => exit_with(&e),
    }
}
