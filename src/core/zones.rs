use crate::domain::model::{ScoredSlot, TemperatureClass};

/// 依溫區切分的候選池，各池保留輸入的排序
#[derive(Debug, Clone, Default)]
pub struct ZonePools {
    frozen: Vec<ScoredSlot>,
    refrigerated: Vec<ScoredSlot>,
    ambient: Vec<ScoredSlot>,
    unsupported: Vec<String>,
}

impl ZonePools {
    /// `ranked` 必須已由 SlotScorer 排序
    pub fn partition(ranked: Vec<ScoredSlot>) -> Self {
        let mut pools = Self::default();

        for scored in ranked {
            match scored.slot.temp_zone.class() {
                Some(TemperatureClass::Frozen) => pools.frozen.push(scored),
                Some(TemperatureClass::Refrigerated) => pools.refrigerated.push(scored),
                Some(TemperatureClass::Ambient) => pools.ambient.push(scored),
                None => pools.unsupported.push(scored.slot.slot_id),
            }
        }

        if !pools.unsupported.is_empty() {
            pools.unsupported.sort();
            tracing::warn!(
                "⚠️ {} slots have an unsupported temp_zone and will never be assigned: {}",
                pools.unsupported.len(),
                pools.unsupported.join(", ")
            );
        }

        tracing::debug!(
            "Zone pools - Frozen: {}, Refrigerated: {}, Ambient: {}",
            pools.frozen.len(),
            pools.refrigerated.len(),
            pools.ambient.len()
        );

        pools
    }

    pub fn pool(&self, class: TemperatureClass) -> &[ScoredSlot] {
        match class {
            TemperatureClass::Frozen => &self.frozen,
            TemperatureClass::Refrigerated => &self.refrigerated,
            TemperatureClass::Ambient => &self.ambient,
        }
    }

    /// 溫區無法辨識、被排除在所有池之外的 slot_id（已排序）
    pub fn unsupported(&self) -> &[String] {
        &self.unsupported
    }
}
