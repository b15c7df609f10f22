use crate::domain::model::{OrderLine, SkuRecord, Slot};
use crate::utils::error::{Result, SlottingError};
use serde::de::DeserializeOwned;
use std::collections::HashSet;

pub const SKU_MASTER_COLUMNS: [&str; 5] =
    ["sku_id", "category", "temp_req", "weight_kg", "current_slot"];
pub const WAREHOUSE_COLUMNS: [&str; 4] = ["slot_id", "aisle_id", "temp_zone", "max_weight_kg"];
pub const ORDER_COLUMNS: [&str; 3] = ["order_id", "sku_id", "order_timestamp"];

struct Row<T> {
    line: Option<u64>,
    value: T,
}

fn csv_schema_error(file: &str, err: csv::Error) -> SlottingError {
    let line = err.position().map(|p| p.line());
    SlottingError::schema(file, line, err.to_string())
}

fn read_rows<T: DeserializeOwned>(file: &str, data: &[u8], required: &[&str]) -> Result<Vec<Row<T>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| csv_schema_error(file, e))?
        .clone();

    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(SlottingError::schema(
                file,
                Some(1),
                format!("missing required column '{}'", column),
            ));
        }
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_schema_error(file, e))?;
        let line = record.position().map(|p| p.line());
        let value = record
            .deserialize(Some(&headers))
            .map_err(|e| SlottingError::schema(file, line, e.to_string()))?;
        rows.push(Row { line, value });
    }

    tracing::debug!("Parsed {} rows from {}", rows.len(), file);
    Ok(rows)
}

fn require_id(file: &str, line: Option<u64>, field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SlottingError::schema(
            file,
            line,
            format!("{} cannot be empty", field),
        ));
    }
    Ok(())
}

fn require_weight(file: &str, line: Option<u64>, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SlottingError::schema(
            file,
            line,
            format!("{} must be a finite non-negative number, got {}", field, value),
        ));
    }
    Ok(())
}

pub fn parse_sku_master(file: &str, data: &[u8]) -> Result<Vec<SkuRecord>> {
    let rows = read_rows::<SkuRecord>(file, data, &SKU_MASTER_COLUMNS)?;
    let mut seen = HashSet::new();
    let mut skus = Vec::with_capacity(rows.len());

    for Row { line, value } in rows {
        require_id(file, line, "sku_id", &value.sku_id)?;
        require_id(file, line, "current_slot", &value.current_slot)?;
        require_weight(file, line, "weight_kg", value.weight_kg)?;
        if !seen.insert(value.sku_id.clone()) {
            return Err(SlottingError::schema(
                file,
                line,
                format!("duplicate sku_id '{}'", value.sku_id),
            ));
        }
        skus.push(value);
    }

    Ok(skus)
}

pub fn parse_warehouse_constraints(file: &str, data: &[u8]) -> Result<Vec<Slot>> {
    let rows = read_rows::<Slot>(file, data, &WAREHOUSE_COLUMNS)?;
    let mut seen = HashSet::new();
    let mut slots = Vec::with_capacity(rows.len());

    for Row { line, value } in rows {
        require_id(file, line, "slot_id", &value.slot_id)?;
        require_weight(file, line, "max_weight_kg", value.max_weight_kg)?;
        if !seen.insert(value.slot_id.clone()) {
            return Err(SlottingError::schema(
                file,
                line,
                format!("duplicate slot_id '{}'", value.slot_id),
            ));
        }
        slots.push(value);
    }

    Ok(slots)
}

pub fn parse_order_transactions(file: &str, data: &[u8]) -> Result<Vec<OrderLine>> {
    let rows = read_rows::<OrderLine>(file, data, &ORDER_COLUMNS)?;
    let mut orders = Vec::with_capacity(rows.len());

    for Row { line, value } in rows {
        require_id(file, line, "sku_id", &value.sku_id)?;
        orders.push(value);
    }

    Ok(orders)
}
