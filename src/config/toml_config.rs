use crate::core::{ConfigProvider, OutputFiles};
use crate::domain::model::{CollisionScope, OptimizerSettings};
use crate::utils::error::{Result, SlottingError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub run: RunInfo,
    pub inputs: InputsConfig,
    pub optimizer: Option<OptimizerConfig>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    pub base_path: Option<String>,
    pub sku_master: String,
    pub warehouse_constraints: String,
    pub order_transactions: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub weight_threshold_kg: Option<f64>,
    pub weight_divisor: Option<f64>,
    pub default_aisle_score: Option<u32>,
    pub collision_scope: Option<CollisionScope>,
    /// 設定後整張表取代預設的走道評分
    pub aisle_scores: Option<HashMap<String, u32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub plan: Option<String>,
    pub corrected_skus: Option<String>,
    pub assignments: Option<String>,
    pub summary: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SlottingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SlottingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SlottingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn optimizer(&self) -> OptimizerConfig {
        self.optimizer.clone().unwrap_or_default()
    }

    pub fn collision_scope(&self) -> CollisionScope {
        self.optimizer().collision_scope.unwrap_or_default()
    }

    pub fn build_settings(&self) -> Result<OptimizerSettings> {
        let optimizer = self.optimizer();
        let defaults = OptimizerSettings::default();

        let aisle_scores = match &optimizer.aisle_scores {
            Some(table) => {
                let mut scores = BTreeMap::new();
                for (key, score) in table {
                    let aisle = validation::validate_aisle_key("optimizer.aisle_scores", key)?;
                    scores.insert(aisle, *score);
                }
                scores
            }
            None => defaults.aisle_scores,
        };

        let settings = OptimizerSettings {
            weight_threshold_kg: optimizer
                .weight_threshold_kg
                .unwrap_or(defaults.weight_threshold_kg),
            weight_divisor: optimizer.weight_divisor.unwrap_or(defaults.weight_divisor),
            aisle_scores,
            default_aisle_score: optimizer
                .default_aisle_score
                .unwrap_or(defaults.default_aisle_score),
            collision_scope: optimizer.collision_scope.unwrap_or(defaults.collision_scope),
        };
        validation::validate_optimizer_settings(&settings)?;
        Ok(settings)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("run.name", &self.run.name)?;

        if let Some(base_path) = &self.inputs.base_path {
            validation::validate_path("inputs.base_path", base_path)?;
        }
        validation::validate_required_field("inputs.sku_master", &self.inputs.sku_master)?;
        validation::validate_required_field(
            "inputs.warehouse_constraints",
            &self.inputs.warehouse_constraints,
        )?;
        validation::validate_required_field(
            "inputs.order_transactions",
            &self.inputs.order_transactions,
        )?;
        validation::validate_file_extensions(
            "inputs",
            &[
                self.inputs.sku_master.clone(),
                self.inputs.warehouse_constraints.clone(),
                self.inputs.order_transactions.clone(),
            ],
            &["csv"],
        )?;

        validation::validate_path("output.output_path", &self.output.output_path)?;
        let files = self.output_files();
        validation::validate_file_extensions("output.filenames", &[files.plan, files.corrected_skus], &["csv"])?;
        validation::validate_file_extensions(
            "output.filenames",
            &[files.assignments, files.summary],
            &["json"],
        )?;

        self.build_settings().map(|_| ())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.inputs.base_path.as_deref().unwrap_or(".")
    }

    fn sku_master_file(&self) -> &str {
        &self.inputs.sku_master
    }

    fn warehouse_constraints_file(&self) -> &str {
        &self.inputs.warehouse_constraints
    }

    fn order_transactions_file(&self) -> &str {
        &self.inputs.order_transactions
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_files(&self) -> OutputFiles {
        let defaults = OutputFiles::default();
        let names = self.output.filenames.clone().unwrap_or_default();
        OutputFiles {
            plan: names.plan.unwrap_or(defaults.plan),
            corrected_skus: names.corrected_skus.unwrap_or(defaults.corrected_skus),
            assignments: names.assignments.unwrap_or(defaults.assignments),
            summary: names.summary.unwrap_or(defaults.summary),
        }
    }

    fn optimizer_settings(&self) -> Result<OptimizerSettings> {
        self.build_settings()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
