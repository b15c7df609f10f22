use crate::domain::model::{OptimizerSettings, ScoredSlot, Slot};
use std::collections::BTreeMap;

/// 依走道字母給 slot 打分，分數越高越好
#[derive(Debug, Clone, PartialEq)]
pub struct SlotScorer {
    aisle_scores: BTreeMap<char, u32>,
    default_score: u32,
}

impl SlotScorer {
    pub fn new(aisle_scores: BTreeMap<char, u32>, default_score: u32) -> Self {
        Self {
            aisle_scores,
            default_score,
        }
    }

    pub fn from_settings(settings: &OptimizerSettings) -> Self {
        Self::new(settings.aisle_scores.clone(), settings.default_aisle_score)
    }

    /// 取 aisle_id 第一個字元查表，查不到（含空字串）用預設分數
    pub fn score(&self, aisle_id: &str) -> u32 {
        aisle_id
            .chars()
            .next()
            .and_then(|c| self.aisle_scores.get(&c).copied())
            .unwrap_or(self.default_score)
    }

    /// 排序鍵：分數降序，同分時 slot_id 升序
    pub fn rank(&self, slots: Vec<Slot>) -> Vec<ScoredSlot> {
        let mut scored: Vec<ScoredSlot> = slots
            .into_iter()
            .map(|slot| {
                let desirability_score = self.score(&slot.aisle_id);
                ScoredSlot {
                    slot,
                    desirability_score,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.desirability_score
                .cmp(&a.desirability_score)
                .then_with(|| a.slot.slot_id.cmp(&b.slot.slot_id))
        });

        tracing::debug!("Ranked {} warehouse slots", scored.len());
        scored
    }
}

impl Default for SlotScorer {
    fn default() -> Self {
        Self::new(
            OptimizerSettings::default_aisle_scores(),
            OptimizerSettings::DEFAULT_AISLE_SCORE,
        )
    }
}
