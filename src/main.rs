use clap::Parser;
use slotting_optimizer::utils::error::ErrorSeverity;
use slotting_optimizer::utils::{logger, validation::Validate};
use slotting_optimizer::{CliConfig, CsvSlottingPipeline, LocalStorage, SlottingEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting slotting-optimizer CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 輸入與輸出各自一個存儲根目錄
    let input = LocalStorage::new(config.input_path.clone());
    let output = LocalStorage::new(config.output_path.clone());
    let pipeline = CsvSlottingPipeline::new(input, output, config);

    let engine = SlottingEngine::new(pipeline);

    match engine.run().await {
        Ok(result) => {
            tracing::info!("✅ Slotting run completed successfully!");
            println!("{}", result.summary);
            println!("✅ Slotting run completed successfully!");
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
