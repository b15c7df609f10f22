use crate::domain::model::{
    AssignmentRecord, PlacementViolation, RunSummary, Sku, SlottingOutcome,
};
use crate::domain::ports::OutputFiles;
use crate::utils::error::{Result, SlottingError};
use serde::Serialize;

const PLAN_HEADERS: [&str; 2] = ["SKU_ID", "Bin_ID"];
const SKU_HEADERS: [&str; 6] = [
    "sku_id",
    "category",
    "temp_req",
    "weight_kg",
    "clean_weight_kg",
    "current_slot",
];

#[derive(Serialize)]
struct SummaryDocument<'a> {
    generated_by: &'static str,
    summary: &'a RunSummary,
    placement_violations: &'a [PlacementViolation],
}

/// 已序列化、等待寫出的檔案
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub files: Vec<(String, Vec<u8>)>,
}

// 表頭手動寫入，空表也有欄位列
fn headed_writer(headers: &[&str]) -> Result<csv::Writer<Vec<u8>>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    Ok(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| SlottingError::IoError(e.into_error()))
}

/// `SKU_ID,Bin_ID`，保持配置時的處理順序
pub fn plan_csv(records: &[AssignmentRecord]) -> Result<Vec<u8>> {
    let mut writer = headed_writer(&PLAN_HEADERS)?;
    for record in records {
        writer.write_record([record.sku_id.as_str(), record.bin_id.as_str()])?;
    }
    finish_csv(writer)
}

pub fn corrected_skus_csv(skus: &[Sku]) -> Result<Vec<u8>> {
    let mut writer = headed_writer(&SKU_HEADERS)?;
    for sku in skus {
        writer.serialize(sku)?;
    }
    finish_csv(writer)
}

pub fn assignments_json(records: &[AssignmentRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

pub fn summary_json(outcome: &SlottingOutcome) -> Result<Vec<u8>> {
    let document = SummaryDocument {
        generated_by: concat!("slotting-optimizer ", env!("CARGO_PKG_VERSION")),
        summary: &outcome.summary,
        placement_violations: &outcome.placement_violations,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// 先在記憶體中完成所有序列化，任何一步失敗就不產生輸出
pub fn render(outcome: &SlottingOutcome, names: &OutputFiles) -> Result<ExportBundle> {
    let files = vec![
        (names.plan.clone(), plan_csv(&outcome.assignments)?),
        (
            names.corrected_skus.clone(),
            corrected_skus_csv(&outcome.corrected_skus)?,
        ),
        (
            names.assignments.clone(),
            assignments_json(&outcome.assignments)?,
        ),
        (names.summary.clone(), summary_json(outcome)?),
    ];

    tracing::debug!("Rendered {} output files", files.len());
    Ok(ExportBundle { files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TemperatureClass;

    fn record(sku_id: &str, bin_id: &str, is_fallback: bool) -> AssignmentRecord {
        AssignmentRecord {
            sku_id: sku_id.to_string(),
            bin_id: bin_id.to_string(),
            is_fallback,
        }
    }

    #[test]
    fn test_plan_csv_keeps_processing_order() {
        let data = plan_csv(&[record("S9", "A01", false), record("S1", "OLD-1", true)]).unwrap();
        let text = String::from_utf8(data).unwrap();

        assert_eq!(text, "SKU_ID,Bin_ID\nS9,A01\nS1,OLD-1\n");
    }

    #[test]
    fn test_corrected_skus_csv_columns() {
        let skus = vec![Sku {
            sku_id: "S2".to_string(),
            category: "Beverages".to_string(),
            temp_req: TemperatureClass::Ambient,
            raw_weight_kg: 120.0,
            corrected_weight_kg: 12.0,
            current_slot: "B01-02".to_string(),
        }];
        let text = String::from_utf8(corrected_skus_csv(&skus).unwrap()).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "sku_id,category,temp_req,weight_kg,clean_weight_kg,current_slot"
        );
        assert_eq!(lines.next().unwrap(), "S2,Beverages,Ambient,120.0,12.0,B01-02");
    }

    #[test]
    fn test_empty_plan_still_has_header() {
        let text = String::from_utf8(plan_csv(&[]).unwrap()).unwrap();
        assert_eq!(text, "SKU_ID,Bin_ID\n");
    }

    #[test]
    fn test_assignments_json_includes_fallback_flag() {
        let data = assignments_json(&[record("S1", "OLD", true)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&data).unwrap();

        assert_eq!(value[0]["is_fallback"], serde_json::Value::Bool(true));
        assert_eq!(value[0]["bin_id"], "OLD");
    }
}
