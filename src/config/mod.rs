pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, OutputFiles};
#[cfg(feature = "cli")]
use crate::domain::model::{CollisionScope, OptimizerSettings};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "slotting-optimizer")]
#[command(about = "Greedy warehouse slotting optimizer")]
pub struct CliConfig {
    #[arg(long, default_value = ".", help = "Directory holding the input CSV files")]
    pub input_path: String,

    #[arg(long, default_value = "sku_master.csv")]
    pub sku_master: String,

    #[arg(long, default_value = "warehouse_constraints.csv")]
    pub warehouse_constraints: String,

    #[arg(long, default_value = "order_transactions.csv")]
    pub order_transactions: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "50", help = "Weights above this value are divided by 10")]
    pub weight_threshold: f64,

    #[arg(long, help = "Also report bins shared by fallback records")]
    pub strict_collisions: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn sku_master_file(&self) -> &str {
        &self.sku_master
    }

    fn warehouse_constraints_file(&self) -> &str {
        &self.warehouse_constraints
    }

    fn order_transactions_file(&self) -> &str {
        &self.order_transactions
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_files(&self) -> OutputFiles {
        OutputFiles::default()
    }

    fn optimizer_settings(&self) -> Result<OptimizerSettings> {
        let settings = OptimizerSettings {
            weight_threshold_kg: self.weight_threshold,
            collision_scope: if self.strict_collisions {
                CollisionScope::AllRecords
            } else {
                CollisionScope::NonFallback
            },
            ..Default::default()
        };
        validation::validate_optimizer_settings(&settings)?;
        Ok(settings)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_extensions(
            "input files",
            &[
                self.sku_master.clone(),
                self.warehouse_constraints.clone(),
                self.order_transactions.clone(),
            ],
            &["csv"],
        )?;
        self.optimizer_settings().map(|_| ())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_args() {
        let config = CliConfig::parse_from(["slotting-optimizer"]);

        assert_eq!(config.sku_master, "sku_master.csv");
        assert_eq!(config.weight_threshold, 50.0);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.optimizer_settings().unwrap().collision_scope,
            CollisionScope::NonFallback
        );
    }

    #[test]
    fn test_strict_collisions_flag() {
        let config = CliConfig::parse_from(["slotting-optimizer", "--strict-collisions"]);
        assert_eq!(
            config.optimizer_settings().unwrap().collision_scope,
            CollisionScope::AllRecords
        );
    }

    #[test]
    fn test_rejects_non_csv_inputs() {
        let config = CliConfig::parse_from(["slotting-optimizer", "--sku-master", "skus.xlsx"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let config = CliConfig::parse_from(["slotting-optimizer", "--weight-threshold", "0"]);
        assert!(config.validate().is_err());
    }
}
