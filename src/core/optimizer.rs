use crate::core::assigner::GreedyAssigner;
use crate::core::audit::{audit_current_placements, detect_slot_collisions};
use crate::core::scoring::SlotScorer;
use crate::core::velocity::VelocityRanker;
use crate::core::weight::WeightCorrector;
use crate::core::zones::ZonePools;
use crate::domain::model::{
    OptimizerSettings, RunSummary, Sku, SkuRecord, SlottingInputs, SlottingOutcome,
};

/// 一次完整的 slotting 計算。每次 `run` 都使用全新的佔用狀態，可重複呼叫
pub struct SlottingOptimizer {
    settings: OptimizerSettings,
}

impl SlottingOptimizer {
    pub fn new(settings: OptimizerSettings) -> Self {
        Self { settings }
    }

    /// 只做重量校正，供報表層讀取校正後的 SKU 表
    pub fn correct_skus(&self, records: Vec<SkuRecord>) -> Vec<Sku> {
        WeightCorrector::from_settings(&self.settings)
            .apply_all(records)
            .0
    }

    pub fn run(&self, inputs: SlottingInputs) -> SlottingOutcome {
        let SlottingInputs {
            skus,
            slots,
            orders,
        } = inputs;

        tracing::info!("🧹 Running weight forensics on {} SKUs", skus.len());
        let (corrected_skus, weight_anomalies_corrected) =
            WeightCorrector::from_settings(&self.settings).apply_all(skus);

        let placement_violations = audit_current_placements(&corrected_skus, &slots);

        tracing::info!("📈 Calculating SKU velocity from {} order lines", orders.len());
        let ranker = VelocityRanker::new();
        let profile = ranker.profile(&corrected_skus, &orders);
        let ranked = ranker.rank(corrected_skus.clone(), &profile);

        tracing::info!("🏟️ Ranking {} warehouse slots", slots.len());
        let scored = SlotScorer::from_settings(&self.settings).rank(slots);
        let pools = ZonePools::partition(scored);

        tracing::info!("🧩 Running assignment logic");
        let run = GreedyAssigner::new().assign(&ranked, &pools);

        let slot_collisions = detect_slot_collisions(&run.records, self.settings.collision_scope);

        let summary = RunSummary {
            total_processed: run.records.len(),
            matched: run.matched,
            fallback: run.fallback,
            weight_anomalies_corrected,
            unsupported_zone_slots: pools.unsupported().to_vec(),
            orders_total: profile.orders_total,
            orders_ignored_unknown_sku: profile.ignored_unknown_sku,
            order_window: profile.window,
            unparseable_timestamps: profile.unparseable_timestamps,
            collision_scope: self.settings.collision_scope,
            slot_collisions,
            current_placement_violations: placement_violations.len(),
            critical_placement_violations: placement_violations
                .iter()
                .filter(|v| v.critical)
                .count(),
        };

        SlottingOutcome {
            corrected_skus,
            assignments: run.records,
            placement_violations,
            summary,
        }
    }
}

impl Default for SlottingOptimizer {
    fn default() -> Self {
        Self::new(OptimizerSettings::default())
    }
}
