use crate::core::Pipeline;
use crate::domain::model::LoadResult;
use crate::utils::error::Result;

pub struct SlottingEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SlottingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<LoadResult> {
        tracing::info!("🚀 Starting slotting optimization");

        // Extract
        tracing::info!("📦 Loading datasets...");
        let inputs = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} SKUs, {} slots, {} order lines",
            inputs.skus.len(),
            inputs.slots.len(),
            inputs.orders.len()
        );

        // Transform
        let outcome = self.pipeline.transform(inputs).await?;
        tracing::info!(
            "Processed {} SKUs (Assigned: {}, Fallback: {})",
            outcome.summary.total_processed,
            outcome.summary.matched,
            outcome.summary.fallback
        );

        // Load
        tracing::info!("💾 Saving results...");
        let result = self.pipeline.load(outcome).await?;
        tracing::info!("Output saved to: {}", result.output_path);

        Ok(result)
    }
}
