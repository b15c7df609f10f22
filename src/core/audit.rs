use crate::domain::model::{
    AssignmentRecord, CollisionScope, PlacementViolation, Sku, Slot, SlotCollision, SlotZone,
    TemperatureClass,
};
use std::collections::{BTreeMap, HashMap};

/// 找出被兩個以上 SKU 佔用的 bin_id，依 bin_id 排序
pub fn detect_slot_collisions(
    records: &[AssignmentRecord],
    scope: CollisionScope,
) -> Vec<SlotCollision> {
    let mut holders: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for record in records {
        if scope == CollisionScope::NonFallback && record.is_fallback {
            continue;
        }
        holders
            .entry(record.bin_id.as_str())
            .or_default()
            .push(record.sku_id.as_str());
    }

    let collisions: Vec<SlotCollision> = holders
        .into_iter()
        .filter(|(_, sku_ids)| sku_ids.len() > 1)
        .map(|(bin_id, sku_ids)| SlotCollision {
            bin_id: bin_id.to_string(),
            sku_ids: sku_ids.into_iter().map(str::to_string).collect(),
        })
        .collect();

    for collision in &collisions {
        tracing::warn!(
            "⚠️ Bin {} is double-booked by {}",
            collision.bin_id,
            collision.sku_ids.join(", ")
        );
    }

    collisions
}

/// 檢查 SKU 目前所在 slot 是否符合溫層需求（調整前的現況）
pub fn audit_current_placements(skus: &[Sku], slots: &[Slot]) -> Vec<PlacementViolation> {
    let zones: HashMap<&str, &SlotZone> = slots
        .iter()
        .map(|slot| (slot.slot_id.as_str(), &slot.temp_zone))
        .collect();

    let violations: Vec<PlacementViolation> = skus
        .iter()
        .filter_map(|sku| {
            let actual = zones.get(sku.current_slot.as_str()).copied();
            if actual.and_then(|zone| zone.class()) == Some(sku.temp_req) {
                return None;
            }

            let critical = sku.temp_req.is_cold_chain()
                && actual == Some(&SlotZone::Supported(TemperatureClass::Ambient));

            Some(PlacementViolation {
                sku_id: sku.sku_id.clone(),
                current_slot: sku.current_slot.clone(),
                required: sku.temp_req,
                actual: actual.cloned(),
                critical,
            })
        })
        .collect();

    let critical = violations.iter().filter(|v| v.critical).count();
    if !violations.is_empty() {
        tracing::warn!(
            "❄️ {} SKUs currently sit in a slot violating their temperature requirement ({} critical)",
            violations.len(),
            critical
        );
    }

    violations
}
