use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 溫層：SKU 的儲存需求，也是 slot 可被分配的三種合法溫區
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TemperatureClass {
    Frozen,
    Refrigerated,
    Ambient,
}

impl TemperatureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureClass::Frozen => "Frozen",
            TemperatureClass::Refrigerated => "Refrigerated",
            TemperatureClass::Ambient => "Ambient",
        }
    }

    pub fn is_cold_chain(&self) -> bool {
        matches!(self, TemperatureClass::Frozen | TemperatureClass::Refrigerated)
    }
}

impl fmt::Display for TemperatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Frozen" => Ok(TemperatureClass::Frozen),
            "Refrigerated" => Ok(TemperatureClass::Refrigerated),
            "Ambient" => Ok(TemperatureClass::Ambient),
            other => Err(format!(
                "unknown temperature class '{}', expected Frozen, Refrigerated or Ambient",
                other
            )),
        }
    }
}

impl TryFrom<String> for TemperatureClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TemperatureClass> for String {
    fn from(value: TemperatureClass) -> Self {
        value.as_str().to_string()
    }
}

/// Slot 的溫區。無法辨識的溫區保留原始字串，不會進入任何候選池
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlotZone {
    Supported(TemperatureClass),
    Unsupported(String),
}

impl SlotZone {
    pub fn class(&self) -> Option<TemperatureClass> {
        match self {
            SlotZone::Supported(class) => Some(*class),
            SlotZone::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for SlotZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotZone::Supported(class) => write!(f, "{}", class),
            SlotZone::Unsupported(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for SlotZone {
    fn from(value: String) -> Self {
        match value.parse::<TemperatureClass>() {
            Ok(class) => SlotZone::Supported(class),
            Err(_) => SlotZone::Unsupported(value),
        }
    }
}

impl From<SlotZone> for String {
    fn from(value: SlotZone) -> Self {
        value.to_string()
    }
}

/// SKU master 的原始列，重量尚未校正
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuRecord {
    pub sku_id: String,
    pub category: String,
    pub temp_req: TemperatureClass,
    pub weight_kg: f64,
    pub current_slot: String,
}

/// 校正後的 SKU。`corrected_weight_kg` 只在建立時由原始重量推導一次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub sku_id: String,
    pub category: String,
    pub temp_req: TemperatureClass,
    #[serde(rename = "weight_kg")]
    pub raw_weight_kg: f64,
    #[serde(rename = "clean_weight_kg")]
    pub corrected_weight_kg: f64,
    pub current_slot: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub slot_id: String,
    pub aisle_id: String,
    pub temp_zone: SlotZone,
    pub max_weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSlot {
    pub slot: Slot,
    pub desirability_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: String,
    pub sku_id: String,
    pub order_timestamp: String,
}

/// 依需求量排序後的 SKU
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSku {
    pub sku: Sku,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub sku_id: String,
    pub bin_id: String,
    pub is_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionScope {
    /// 只檢查成功配對的紀錄
    #[default]
    NonFallback,
    /// 包含 fallback 紀錄在內的所有紀錄
    AllRecords,
}

impl FromStr for CollisionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "non_fallback" => Ok(CollisionScope::NonFallback),
            "all_records" => Ok(CollisionScope::AllRecords),
            other => Err(format!(
                "unknown collision scope '{}', expected non_fallback or all_records",
                other
            )),
        }
    }
}

/// 同一個 bin 被多個 SKU 佔用的資料品質發現
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCollision {
    pub bin_id: String,
    pub sku_ids: Vec<String>,
}

/// SKU 目前所在 slot 的溫區不符合需求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementViolation {
    pub sku_id: String,
    pub current_slot: String,
    pub required: TemperatureClass,
    /// None 表示 current_slot 不在倉庫資料中
    pub actual: Option<SlotZone>,
    pub critical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWindow {
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerSettings {
    pub weight_threshold_kg: f64,
    pub weight_divisor: f64,
    pub aisle_scores: BTreeMap<char, u32>,
    pub default_aisle_score: u32,
    pub collision_scope: CollisionScope,
}

impl OptimizerSettings {
    pub const DEFAULT_WEIGHT_THRESHOLD_KG: f64 = 50.0;
    pub const DEFAULT_WEIGHT_DIVISOR: f64 = 10.0;
    pub const DEFAULT_AISLE_SCORE: u32 = 50;

    /// A 靠近出入口最佳；B 有堆高機限制，刻意壓低
    pub fn default_aisle_scores() -> BTreeMap<char, u32> {
        BTreeMap::from([
            ('A', 100),
            ('C', 90),
            ('D', 80),
            ('E', 70),
            ('F', 60),
            ('B', 40),
        ])
    }
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            weight_threshold_kg: Self::DEFAULT_WEIGHT_THRESHOLD_KG,
            weight_divisor: Self::DEFAULT_WEIGHT_DIVISOR,
            aisle_scores: Self::default_aisle_scores(),
            default_aisle_score: Self::DEFAULT_AISLE_SCORE,
            collision_scope: CollisionScope::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_processed: usize,
    pub matched: usize,
    pub fallback: usize,
    pub weight_anomalies_corrected: usize,
    pub unsupported_zone_slots: Vec<String>,
    pub orders_total: usize,
    pub orders_ignored_unknown_sku: usize,
    pub order_window: Option<OrderWindow>,
    pub unparseable_timestamps: usize,
    pub collision_scope: CollisionScope,
    pub slot_collisions: Vec<SlotCollision>,
    pub current_placement_violations: usize,
    pub critical_placement_violations: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Slotting Run Summary:")?;
        writeln!(f, "  Processed SKUs: {}", self.total_processed)?;
        writeln!(f, "  Assigned: {}", self.matched)?;
        writeln!(f, "  Fallback (kept current slot): {}", self.fallback)?;
        writeln!(
            f,
            "  Weight anomalies corrected: {}",
            self.weight_anomalies_corrected
        )?;
        writeln!(
            f,
            "  Orders: {} ({} ignored for unknown SKUs)",
            self.orders_total, self.orders_ignored_unknown_sku
        )?;
        if let Some(window) = &self.order_window {
            writeln!(f, "  Order window: {} -> {}", window.first, window.last)?;
        }
        if !self.unsupported_zone_slots.is_empty() {
            writeln!(
                f,
                "  ⚠️ Unreachable slots (unsupported zone): {}",
                self.unsupported_zone_slots.len()
            )?;
        }
        writeln!(
            f,
            "  Current placement violations: {} ({} critical)",
            self.current_placement_violations, self.critical_placement_violations
        )?;
        if self.slot_collisions.is_empty() {
            write!(f, "  Slot collisions: none")
        } else {
            write!(
                f,
                "  ⚠️ Slot collisions: {} bins double-booked",
                self.slot_collisions.len()
            )
        }
    }
}

/// Extract 階段的產出：已型別化的三張輸入表
#[derive(Debug, Clone, Default)]
pub struct SlottingInputs {
    pub skus: Vec<SkuRecord>,
    pub slots: Vec<Slot>,
    pub orders: Vec<OrderLine>,
}

/// Transform 階段的產出
#[derive(Debug, Clone)]
pub struct SlottingOutcome {
    pub corrected_skus: Vec<Sku>,
    pub assignments: Vec<AssignmentRecord>,
    pub placement_violations: Vec<PlacementViolation>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone)]
pub struct LoadResult {
    pub output_path: String,
    pub files: Vec<String>,
    pub summary: RunSummary,
}
