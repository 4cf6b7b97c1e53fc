use clap::Parser;
use kotoba_links::utils::{logger, validation::Validate};
use kotoba_links::{CliConfig, EnrichEngine, EnrichPipeline, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, None);

    tracing::info!("Starting kotoba-links");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    // Storage is rooted at the output directory; anchor the input to the cwd.
    config.input = std::env::current_dir()?
        .join(&config.input)
        .to_string_lossy()
        .into_owned();

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = EnrichPipeline::new(storage, config);
    let engine = EnrichEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Enrichment completed successfully!");
            println!("📁 Output saved to: {}", output_path);
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

    Ok(())
}
