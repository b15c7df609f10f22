pub mod assigner;
pub mod audit;
pub mod engine;
pub mod export;
pub mod ingest;
pub mod optimizer;
pub mod scoring;
pub mod velocity;
pub mod weight;
pub mod zones;

pub use crate::domain::model::{SlottingInputs, SlottingOutcome};
pub use crate::domain::ports::{ConfigProvider, OutputFiles, Pipeline, Storage};
pub use crate::utils::error::Result;
