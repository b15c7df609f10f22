pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::CsvSlottingPipeline;
pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use core::{engine::SlottingEngine, optimizer::SlottingOptimizer};
pub use domain::model::{AssignmentRecord, OptimizerSettings, RunSummary, Sku};
pub use utils::error::{Result, SlottingError};
