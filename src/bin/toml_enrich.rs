use clap::Parser;
use kotoba_links::core::ConfigProvider;
use kotoba_links::utils::{logger, validation::Validate};
use kotoba_links::{EnrichEngine, EnrichPipeline, LocalStorage, TomlConfig, Vocabulary};
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-enrich")]
#[command(about = "Vocabulary link enrichment driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "kotoba.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - parse and validate the input without writing outputs
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    if config.json_logs() {
        logger::init_json_logger(args.verbose, config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    // Relative input paths are resolved against the config file's directory.
    let config_dir = Path::new(&args.config)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    config.source.input_path = std::env::current_dir()?
        .join(config_dir)
        .join(&config.source.input_path)
        .to_string_lossy()
        .into_owned();

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No outputs will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.load.output_path.clone());
    let engine = EnrichEngine::new(EnrichPipeline::new(storage, config));

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Enrichment completed successfully!");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Enrichment failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("   Input: {}", config.input_path());
    tracing::info!("   Output: {}", config.output_path());
    tracing::info!("   Formats: {:?}", config.output_formats());
    if !config.jlpt_levels().is_empty() {
        tracing::info!("   Levels: {:?}", config.jlpt_levels());
    }
    tracing::info!("   Compression: {}", config.compress());
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let data = std::fs::read(config.input_path())?;
    let records: Vec<Vocabulary> = serde_json::from_slice(&data)?;

    let mut invalid = 0;
    for record in &records {
        if let Err(e) = record.validate() {
            invalid += 1;
            tracing::warn!("{}", e);
        }
    }

    tracing::info!(
        "🔍 {} records, {} invalid, {} selected by level filter",
        records.len(),
        invalid,
        records
            .iter()
            .filter(|v| config.jlpt_levels().is_empty()
                || config.jlpt_levels().contains(&v.jlpt_level))
            .count()
    );

    if let Some(sample) = records.first() {
        let links = config.search_links().enrich(sample);
        tracing::info!("🔗 Sample: {} -> {}", links.vocabulary.search_word(), links.youtube_url);
    }
    Ok(())
}
