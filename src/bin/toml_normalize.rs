use clap::Parser;
use placekit::config::toml_config::TomlConfig;
use placekit::utils::{logger, validation::Validate};
use placekit::{LocalStorage, NormalizeEngine, PlacePipeline};

#[derive(Parser)]
#[command(name = "toml-normalize")]
#[command(about = "Place normalization with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "placekit.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override max_records setting from config
    #[arg(long)]
    max_records: Option<usize>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based place normalization");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(max_records) = args.max_records {
        config.extract.max_records = Some(max_records);
        tracing::info!("🔧 max_records overridden to: {}", max_records);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.load.output_path.clone());
    let pipeline = PlacePipeline::new(storage, config);

    let engine = NormalizeEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Normalization completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Normalization completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Normalization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                placekit::utils::error::ErrorSeverity::Low => 0,
                placekit::utils::error::ErrorSeverity::Medium => 2,
                placekit::utils::error::ErrorSeverity::High => 1,
                placekit::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!("  Source: {}", config.source.path);
    println!("  Output: {}", config.load.output_path);
    println!("  Formats: {}", config.load.output_formats.join(", "));

    if let Some(max_records) = config.extract.max_records {
        println!("  Max Records: {}", max_records);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📄 Data Source Analysis:");
    println!("  File: {}", config.source.path);
    println!(
        "  Exists: {}",
        std::path::Path::new(&config.source.path).exists()
    );

    println!();
    println!("⚙️ Processing Mode:");
    let prefer = config.transform.prefer.as_deref().unwrap_or("structured");
    println!("  Preferred generation for mixed records: {}", prefer);
    if let Some(max) = config.extract.max_records {
        println!("  📊 Max records limit: {}", max);
    }
    if let Some(error_handling) = &config.error_handling {
        if error_handling.on_unrecognized_record.as_deref() == Some("fail") {
            println!("  ⚠️ Strict mode: unrecognizable records abort the run");
        }
    }

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.load.output_path);
    println!("  Formats: {}", config.load.output_formats.join(", "));

    if let Some(compression) = &config.load.compression {
        if compression.enabled {
            println!("  Compression: places_output.zip (ZIP)");
        }
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
