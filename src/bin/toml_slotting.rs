use anyhow::Context;
use clap::Parser;
use slotting_optimizer::core::ConfigProvider;
use slotting_optimizer::domain::model::CollisionScope;
use slotting_optimizer::utils::error::ErrorSeverity;
use slotting_optimizer::utils::{logger, validation::Validate};
use slotting_optimizer::{CsvSlottingPipeline, LocalStorage, SlottingEngine, TomlConfig};
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-slotting")]
#[command(about = "Slotting optimizer with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "slotting-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Override collision scope from config (non_fallback | all_records)
    #[arg(long)]
    collision_scope: Option<CollisionScope>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based slotting optimizer");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(scope) = args.collision_scope {
        config.optimizer.get_or_insert_with(Default::default).collision_scope = Some(scope);
        tracing::info!("🔧 Collision scope overridden to: {:?}", scope);
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
        perform_dry_run(&config).context("dry run failed")?;
        return Ok(());
    }

    let input = LocalStorage::new(config.input_path().to_string());
    let output = LocalStorage::new(config.output_path().to_string());
    let pipeline = CsvSlottingPipeline::new(input, output, config);
    let engine = SlottingEngine::new(pipeline);

    match engine.run().await {
        Ok(result) => {
            tracing::info!("✅ Slotting run completed successfully!");
            println!("{}", result.summary);
            println!("✅ Slotting run completed successfully!");
            println!("📁 Files written: {}", result.files.join(", "));
            println!("📁 Plan saved to: {}", result.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Slotting run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
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
        "  Run: {} v{}",
        config.run.name,
        config.run.version.as_deref().unwrap_or("-")
    );
    println!("  Inputs: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Collision scope: {:?}", config.collision_scope());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let settings = config.optimizer_settings()?;

    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📦 Input Files:");
    for file in [
        config.sku_master_file(),
        config.warehouse_constraints_file(),
        config.order_transactions_file(),
    ] {
        let path = Path::new(config.input_path()).join(file);
        let marker = if path.exists() { "✅" } else { "❌ missing" };
        println!("  {} {}", path.display(), marker);
    }

    println!();
    println!("⚙️ Optimizer Settings:");
    println!(
        "  Weight correction: > {} kg divided by {}",
        settings.weight_threshold_kg, settings.weight_divisor
    );
    println!("  Default aisle score: {}", settings.default_aisle_score);
    for (aisle, score) in &settings.aisle_scores {
        println!("  Aisle {} -> {}", aisle, score);
    }

    println!();
    println!("💾 Output Files:");
    let files = config.output_files();
    for name in [
        &files.plan,
        &files.corrected_skus,
        &files.assignments,
        &files.summary,
    ] {
        println!("  {}", Path::new(config.output_path()).join(name).display());
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
