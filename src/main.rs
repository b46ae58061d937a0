use anyhow::Context;
use clap::Parser;
use parts_catalog_etl::utils::error::ErrorSeverity;
use parts_catalog_etl::utils::{logger, validation::Validate};
use parts_catalog_etl::{
    CatalogPipeline, CatalogRules, CliConfig, EtlEngine, LocalStorage, LogFormat, RulesConfig,
};

fn load_rules(config: &CliConfig) -> anyhow::Result<CatalogRules> {
    let rules_config = match &config.rules {
        Some(path) => {
            tracing::info!("Loading rules from: {}", path);
            RulesConfig::from_file(path)
                .with_context(|| format!("failed to load rules file '{}'", path))?
        }
        None => RulesConfig::default(),
    };

    let rules = rules_config
        .compile()
        .context("rules failed validation")?;

    // The flag can only turn retention on; the rules file may already have.
    let retain = rules.retain_bin_code || config.retain_bin_code;
    Ok(rules.with_retained_bin_code(retain))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting parts-catalog-etl");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let rules = match load_rules(&config) {
        Ok(rules) => rules,
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Run without --rules to use the built-in classification rules");
            std::process::exit(1);
        }
    };

    let dry_run = config.dry_run;
    let storage = LocalStorage::new(config.base_dir.clone());
    let pipeline = CatalogPipeline::new(storage, config, rules);
    let engine = EtlEngine::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no output will be written");
        match engine.preview().await {
            Ok(result) => {
                println!("Parsed {} parts (not written)", result.records.len());
                for (category, count) in result.category_counts() {
                    println!("  {}: {}", category, count);
                }
                return Ok(());
            }
            Err(e) => exit_with(e),
        }
    }

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Catalog conversion completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: parts_catalog_etl::EtlError) -> ! {
    tracing::error!(
        "❌ Catalog conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
