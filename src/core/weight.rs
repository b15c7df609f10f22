use crate::domain::model::{OptimizerSettings, Sku, SkuRecord};

/// 修正重量的小數點漂移：超過門檻的紀錄被多記了一個數量級
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightCorrector {
    threshold_kg: f64,
    divisor: f64,
}

impl WeightCorrector {
    pub fn new(threshold_kg: f64, divisor: f64) -> Self {
        Self {
            threshold_kg,
            divisor,
        }
    }

    pub fn from_settings(settings: &OptimizerSettings) -> Self {
        Self::new(settings.weight_threshold_kg, settings.weight_divisor)
    }

    /// 嚴格大於門檻才校正，剛好等於門檻的值保持不變
    pub fn is_anomaly(&self, raw_weight_kg: f64) -> bool {
        raw_weight_kg > self.threshold_kg
    }

    pub fn correct_weight(&self, raw_weight_kg: f64) -> f64 {
        if self.is_anomaly(raw_weight_kg) {
            raw_weight_kg / self.divisor
        } else {
            raw_weight_kg
        }
    }

    pub fn apply(&self, record: SkuRecord) -> Sku {
        let corrected_weight_kg = self.correct_weight(record.weight_kg);
        Sku {
            sku_id: record.sku_id,
            category: record.category,
            temp_req: record.temp_req,
            raw_weight_kg: record.weight_kg,
            corrected_weight_kg,
            current_slot: record.current_slot,
        }
    }

    /// 回傳校正後的 SKU 與被校正的筆數
    pub fn apply_all(&self, records: Vec<SkuRecord>) -> (Vec<Sku>, usize) {
        let corrected = records
            .iter()
            .filter(|r| self.is_anomaly(r.weight_kg))
            .count();
        let skus = records.into_iter().map(|r| self.apply(r)).collect();

        tracing::info!("🧹 Corrected {} weight anomalies", corrected);
        (skus, corrected)
    }
}

impl Default for WeightCorrector {
    fn default() -> Self {
        Self::new(
            OptimizerSettings::DEFAULT_WEIGHT_THRESHOLD_KG,
            OptimizerSettings::DEFAULT_WEIGHT_DIVISOR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TemperatureClass;

    fn record(sku_id: &str, weight_kg: f64) -> SkuRecord {
        SkuRecord {
            sku_id: sku_id.to_string(),
            category: "Dairy".to_string(),
            temp_req: TemperatureClass::Refrigerated,
            weight_kg,
            current_slot: "A01-01".to_string(),
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let corrector = WeightCorrector::default();
        assert_eq!(corrector.correct_weight(50.0), 50.0);
        assert!(!corrector.is_anomaly(50.0));
        assert!(corrector.is_anomaly(50.5));
        assert!((corrector.correct_weight(50.5) - 5.05).abs() < 1e-9);
    }

    #[test]
    fn test_values_below_threshold_untouched() {
        let corrector = WeightCorrector::default();
        assert_eq!(corrector.correct_weight(0.0), 0.0);
        assert_eq!(corrector.correct_weight(12.3), 12.3);
    }

    #[test]
    fn test_apply_all_counts_anomalies() {
        let corrector = WeightCorrector::default();
        let (skus, corrected) = corrector.apply_all(vec![
            record("S1", 5.0),
            record("S2", 120.0),
            record("S3", 50.0),
        ]);

        assert_eq!(corrected, 1);
        assert_eq!(skus[1].raw_weight_kg, 120.0);
        assert_eq!(skus[1].corrected_weight_kg, 12.0);
        assert_eq!(skus[2].corrected_weight_kg, 50.0);
    }

    #[test]
    fn test_custom_threshold() {
        let corrector = WeightCorrector::new(20.0, 10.0);
        assert_eq!(corrector.correct_weight(30.0), 3.0);
        assert_eq!(corrector.correct_weight(20.0), 20.0);
    }
}
