use crate::core::export;
use crate::core::ingest::{parse_order_transactions, parse_sku_master, parse_warehouse_constraints};
use crate::core::optimizer::SlottingOptimizer;
use crate::core::{ConfigProvider, Pipeline, SlottingInputs, SlottingOutcome, Storage};
use crate::domain::model::LoadResult;
use crate::utils::error::{Result, SlottingError};
use std::path::Path;

const PARTIAL_SUFFIX: &str = ".partial";

/// 從三張 CSV 表讀入、執行 slotting、寫出計畫檔
pub struct CsvSlottingPipeline<S: Storage, C: ConfigProvider> {
    input: S,
    output: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CsvSlottingPipeline<S, C> {
    pub fn new(input: S, output: S, config: C) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// 先寫入暫存檔，全部成功後才改名為正式檔名；任一寫入失敗則清掉暫存檔
    async fn write_staged(&self, files: &[(String, Vec<u8>)]) -> Result<Vec<String>> {
        let mut staged = Vec::with_capacity(files.len());
        for (name, data) in files {
            let partial = format!("{}{}", name, PARTIAL_SUFFIX);
            tracing::debug!("Writing {} ({} bytes)", partial, data.len());
            if let Err(e) = self.output.write_file(&partial, data).await {
                self.discard(&staged).await;
                return Err(e);
            }
            staged.push(partial);
        }

        let mut written = Vec::with_capacity(files.len());
        for ((name, _), partial) in files.iter().zip(&staged) {
            self.output.rename_file(partial, name).await?;
            written.push(name.clone());
        }
        Ok(written)
    }

    async fn discard(&self, staged: &[String]) {
        for partial in staged {
            if let Err(e) = self.output.remove_file(partial).await {
                tracing::warn!("⚠️ Could not remove {}: {}", partial, e);
            }
        }
    }

    async fn read_input(&self, file: &str) -> Result<Vec<u8>> {
        match self.input.read_file(file).await {
            Ok(data) => Ok(data),
            Err(SlottingError::IoError(source)) | Err(SlottingError::MissingInput { source, .. }) => {
                let path = Path::new(self.config.input_path()).join(file);
                Err(SlottingError::MissingInput {
                    path: path.display().to_string(),
                    source,
                })
            }
            Err(other) => Err(other),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvSlottingPipeline<S, C> {
    async fn extract(&self) -> Result<SlottingInputs> {
        let sku_file = self.config.sku_master_file();
        let slot_file = self.config.warehouse_constraints_file();
        let order_file = self.config.order_transactions_file();

        // 全部讀取成功後才解析，缺檔時不做任何計算
        let sku_data = self.read_input(sku_file).await?;
        let slot_data = self.read_input(slot_file).await?;
        let order_data = self.read_input(order_file).await?;

        tracing::debug!(
            "Read {} / {} / {} bytes of input",
            sku_data.len(),
            slot_data.len(),
            order_data.len()
        );

        Ok(SlottingInputs {
            skus: parse_sku_master(sku_file, &sku_data)?,
            slots: parse_warehouse_constraints(slot_file, &slot_data)?,
            orders: parse_order_transactions(order_file, &order_data)?,
        })
    }

    async fn transform(&self, inputs: SlottingInputs) -> Result<SlottingOutcome> {
        let settings = self.config.optimizer_settings()?;
        let optimizer = SlottingOptimizer::new(settings);
        Ok(optimizer.run(inputs))
    }

    async fn load(&self, outcome: SlottingOutcome) -> Result<LoadResult> {
        let names = self.config.output_files();
        let bundle = export::render(&outcome, &names)?;

        let files = self.write_staged(&bundle.files).await?;

        let output_path = Path::new(self.config.output_path())
            .join(&names.plan)
            .display()
            .to_string();
        tracing::info!("✅ {} generated successfully!", names.plan);

        Ok(LoadResult {
            output_path,
            files,
            summary: outcome.summary,
        })
    }
}
