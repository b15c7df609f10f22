use crate::domain::model::OptimizerSettings;
use crate::utils::error::{Result, SlottingError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SlottingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SlottingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(field_name: &str, files: &[String], allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        validate_path(field_name, file)?;

        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension) {
                return Err(SlottingError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(SlottingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SlottingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 必填欄位為空時視為未設定
pub fn validate_required_field(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SlottingError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// 走道評分表的 key 必須是單一字元
pub fn validate_aisle_key(field_name: &str, key: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(SlottingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "Aisle key must be exactly one character".to_string(),
        }),
    }
}

pub fn validate_optimizer_settings(settings: &OptimizerSettings) -> Result<()> {
    if !settings.weight_threshold_kg.is_finite() || settings.weight_threshold_kg <= 0.0 {
        return Err(SlottingError::InvalidConfigValueError {
            field: "weight_threshold_kg".to_string(),
            value: settings.weight_threshold_kg.to_string(),
            reason: "Threshold must be a finite number greater than 0".to_string(),
        });
    }

    if !settings.weight_divisor.is_finite() || settings.weight_divisor <= 1.0 {
        return Err(SlottingError::InvalidConfigValueError {
            field: "weight_divisor".to_string(),
            value: settings.weight_divisor.to_string(),
            reason: "Divisor must be a finite number greater than 1".to_string(),
        });
    }

    Ok(())
}
