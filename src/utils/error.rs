use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlottingError {
    #[error("Input source '{path}' cannot be read: {source}")]
    MissingInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema error in {file}{}: {message}", line_suffix(.line))]
    Schema {
        file: String,
        line: Option<u64>,
        message: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" (line {})", line),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SlottingError {
    pub fn schema(file: &str, line: Option<u64>, message: impl Into<String>) -> Self {
        SlottingError::Schema {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SlottingError::MissingInput { .. }
            | SlottingError::Schema { .. }
            | SlottingError::CsvError(_) => ErrorCategory::Input,
            SlottingError::ConfigError { .. }
            | SlottingError::MissingConfigError { .. }
            | SlottingError::InvalidConfigValueError { .. }
            | SlottingError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SlottingError::SerializationError(_) => ErrorCategory::Processing,
            SlottingError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration | ErrorCategory::Processing => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SlottingError::MissingInput { .. } => {
                "檢查輸入路徑，確認 sku_master / warehouse_constraints / order_transactions 檔案存在且可讀取"
            }
            SlottingError::Schema { .. } | SlottingError::CsvError(_) => {
                "檢查 CSV 標頭與欄位型別是否符合預期格式"
            }
            SlottingError::ConfigError { .. }
            | SlottingError::MissingConfigError { .. }
            | SlottingError::InvalidConfigValueError { .. }
            | SlottingError::ConfigValidationError { .. } => "檢查命令列參數或 TOML 配置檔",
            SlottingError::SerializationError(_) => "使用 --verbose 重新執行以取得詳細日誌",
            SlottingError::IoError(_) => "檢查輸出目錄的權限與磁碟空間",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SlottingError::MissingInput { path, .. } => {
                format!("Cannot read input file: {}", path)
            }
            SlottingError::Schema { file, line, message } => match line {
                Some(line) => format!("Invalid data in {} at line {}: {}", file, line, message),
                None => format!("Invalid data in {}: {}", file, message),
            },
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlottingError>;
