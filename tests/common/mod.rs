#![allow(dead_code)]

use slotting_optimizer::core::{ConfigProvider, OutputFiles};
use slotting_optimizer::domain::model::OptimizerSettings;
use slotting_optimizer::Result;
use std::path::Path;
use tempfile::TempDir;

pub const SKU_HEADER: &str = "sku_id,category,temp_req,weight_kg,current_slot\n";
pub const SLOT_HEADER: &str = "slot_id,aisle_id,temp_zone,max_weight_kg\n";
pub const ORDER_HEADER: &str = "order_id,sku_id,order_timestamp\n";

pub struct TestConfig {
    pub input_path: String,
    pub output_path: String,
    pub settings: OptimizerSettings,
}

impl ConfigProvider for TestConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn sku_master_file(&self) -> &str {
        "sku_master.csv"
    }

    fn warehouse_constraints_file(&self) -> &str {
        "warehouse_constraints.csv"
    }

    fn order_transactions_file(&self) -> &str {
        "order_transactions.csv"
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_files(&self) -> OutputFiles {
        OutputFiles::default()
    }

    fn optimizer_settings(&self) -> Result<OptimizerSettings> {
        Ok(self.settings.clone())
    }
}

/// 在暫存目錄寫入三張輸入表
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn input_dir(&self) -> String {
        self.dir.path().join("input").to_str().unwrap().to_string()
    }

    pub fn output_dir(&self) -> String {
        self.dir.path().join("output").to_str().unwrap().to_string()
    }

    pub fn write_input(&self, name: &str, content: &str) {
        let dir = Path::new(&self.input_dir()).to_path_buf();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), content).unwrap();
    }

    pub fn write_tables(&self, skus: &str, slots: &str, orders: &str) {
        self.write_input("sku_master.csv", &format!("{}{}", SKU_HEADER, skus));
        self.write_input(
            "warehouse_constraints.csv",
            &format!("{}{}", SLOT_HEADER, slots),
        );
        self.write_input(
            "order_transactions.csv",
            &format!("{}{}", ORDER_HEADER, orders),
        );
    }

    pub fn config(&self) -> TestConfig {
        TestConfig {
            input_path: self.input_dir(),
            output_path: self.output_dir(),
            settings: OptimizerSettings::default(),
        }
    }

    pub fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(Path::new(&self.output_dir()).join(name)).unwrap()
    }

    pub fn output_exists(&self, name: &str) -> bool {
        Path::new(&self.output_dir()).join(name).exists()
    }
}
