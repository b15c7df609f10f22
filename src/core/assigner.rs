use crate::core::zones::ZonePools;
use crate::domain::model::{AssignmentRecord, RankedSku, ScoredSlot, Sku};
use std::collections::HashSet;

/// 單一候選池的搜尋結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSearch<'a> {
    Matched(&'a str),
    Exhausted,
}

/// 每次執行各自擁有的 slot 佔用狀態，不跨執行共享
#[derive(Debug, Clone, Default)]
pub struct SlotAvailability {
    consumed: HashSet<String>,
}

impl SlotAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_available(&self, slot_id: &str) -> bool {
        !self.consumed.contains(slot_id)
    }

    /// 標記為已佔用，回傳該 slot 先前是否可用
    pub fn consume(&mut self, slot_id: &str) -> bool {
        self.consumed.insert(slot_id.to_string())
    }

    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentRun {
    pub records: Vec<AssignmentRecord>,
    pub matched: usize,
    pub fallback: usize,
}

pub struct GreedyAssigner {}

impl GreedyAssigner {
    pub fn new() -> Self {
        Self {}
    }

    /// First-fit：依池內順序找第一個可用且承重足夠的 slot
    pub fn find_slot<'a>(
        &self,
        sku: &Sku,
        pool: &'a [ScoredSlot],
        availability: &SlotAvailability,
    ) -> SlotSearch<'a> {
        pool.iter()
            .find(|candidate| {
                availability.is_available(&candidate.slot.slot_id)
                    && sku.corrected_weight_kg <= candidate.slot.max_weight_kg
            })
            .map(|candidate| SlotSearch::Matched(candidate.slot.slot_id.as_str()))
            .unwrap_or(SlotSearch::Exhausted)
    }

    pub fn assign(&self, ranked: &[RankedSku], pools: &ZonePools) -> AssignmentRun {
        let mut availability = SlotAvailability::new();
        self.assign_with(ranked, pools, &mut availability)
    }

    /// 依優先序逐一配置。池中找不到時退回 SKU 目前的 slot，
    /// 且不檢查該 slot 是否已被佔用，重複佔用交由 audit 偵測
    pub fn assign_with(
        &self,
        ranked: &[RankedSku],
        pools: &ZonePools,
        availability: &mut SlotAvailability,
    ) -> AssignmentRun {
        let mut run = AssignmentRun {
            records: Vec::with_capacity(ranked.len()),
            ..Default::default()
        };

        for entry in ranked {
            let sku = &entry.sku;
            let pool = pools.pool(sku.temp_req);

            match self.find_slot(sku, pool, availability) {
                SlotSearch::Matched(slot_id) => {
                    availability.consume(slot_id);
                    run.records.push(AssignmentRecord {
                        sku_id: sku.sku_id.clone(),
                        bin_id: slot_id.to_string(),
                        is_fallback: false,
                    });
                    run.matched += 1;
                }
                SlotSearch::Exhausted => {
                    let was_available = availability.consume(&sku.current_slot);
                    tracing::debug!(
                        "No {} slot fits {} ({:.2} kg), keeping {}{}",
                        sku.temp_req,
                        sku.sku_id,
                        sku.corrected_weight_kg,
                        sku.current_slot,
                        if was_available { "" } else { " (already occupied)" }
                    );
                    run.records.push(AssignmentRecord {
                        sku_id: sku.sku_id.clone(),
                        bin_id: sku.current_slot.clone(),
                        is_fallback: true,
                    });
                    run.fallback += 1;
                }
            }
        }

        tracing::info!(
            "🧩 Assignment complete (Assigned: {}, Fallback: {})",
            run.matched,
            run.fallback
        );
        tracing::debug!("{} slots consumed", availability.consumed_count());
        run
    }
}

impl Default for GreedyAssigner {
    fn default() -> Self {
        Self::new()
    }
}
