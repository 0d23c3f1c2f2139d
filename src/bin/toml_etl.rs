use anyhow::Context;
use clap::Parser;
use price_etl::core::{ConfigProvider, LoadSummary, RecordSink};
use price_etl::utils::{logger, validation::Validate};
use price_etl::{
    CaptureFileSource, DryRunSink, EtlEngine, EtlError, LocalStorage, PricingPipeline, TomlConfig,
    WebhookSink,
};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Plan price extraction with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "price-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show the configuration and print rows instead of sending them
    #[arg(long)]
    dry_run: bool,
}

async fn run<K: RecordSink>(config: TomlConfig, sink: K) -> price_etl::Result<LoadSummary> {
    let source =
        CaptureFileSource::new(LocalStorage::new(".".to_string()), config.source.input.clone());
    let storage = LocalStorage::new(config.output_path().unwrap_or(".").to_string());
    let pipeline = PricingPipeline::new(source, sink, storage, config);

    EtlEngine::new(pipeline).run().await
}

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Price extraction failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based price extraction");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let result = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - rows will be printed, not sent");
        run(config, DryRunSink).await
    } else {
        match WebhookSink::from_config(&config.sink) {
            Ok(sink) => run(config, sink).await,
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(summary) => {
            tracing::info!("✅ Price extraction completed successfully!");
            for file in &summary.snapshot_files {
                println!("📁 Snapshot saved: {}", file);
            }
            if let Some(response) = summary.sink_response {
                println!("Sheet: {}", response);
            }
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    match &config.pipeline.version {
        Some(version) => println!("  Pipeline: {} v{}", config.pipeline.name, version),
        None => println!("  Pipeline: {}", config.pipeline.name),
    }
    println!("  Capture: {}", config.source.input);
    println!("  Source id: {}", config.source_id());
    println!("  Plans: {}", config.plans().join(", "));
    println!("  Period: {}", config.period());

    match config.output_path() {
        Some(path) => println!(
            "  Snapshot: {} ({})",
            path,
            config.output_formats().join(", ")
        ),
        None => println!("  Snapshot: disabled"),
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    } else {
        println!(
            "  Webhook: timeout {}s, {} retr{}",
            config.sink.timeout_seconds,
            config.sink.retry_attempts,
            if config.sink.retry_attempts == 1 { "y" } else { "ies" }
        );
    }

    println!();
}
