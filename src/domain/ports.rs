use crate::domain::model::{LoadResult, OptimizerSettings, SlottingInputs, SlottingOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn rename_file(
        &self,
        from: &str,
        to: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 輸出檔名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub plan: String,
    pub corrected_skus: String,
    pub assignments: String,
    pub summary: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            plan: "final_slotting_plan.csv".to_string(),
            corrected_skus: "sku_master_corrected.csv".to_string(),
            assignments: "slotting_assignments.json".to_string(),
            summary: "slotting_summary.json".to_string(),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn sku_master_file(&self) -> &str;
    fn warehouse_constraints_file(&self) -> &str;
    fn order_transactions_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_files(&self) -> OutputFiles;
    fn optimizer_settings(&self) -> Result<OptimizerSettings>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SlottingInputs>;
    async fn transform(&self, inputs: SlottingInputs) -> Result<SlottingOutcome>;
    async fn load(&self, outcome: SlottingOutcome) -> Result<LoadResult>;
}
