use crate::domain::model::{OrderLine, OrderWindow, RankedSku, Sku};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// 訂單歷史的統計結果
#[derive(Debug, Clone, Default)]
pub struct VelocityProfile {
    pub counts: HashMap<String, u64>,
    pub orders_total: usize,
    pub ignored_unknown_sku: usize,
    pub window: Option<OrderWindow>,
    pub unparseable_timestamps: usize,
}

impl VelocityProfile {
    pub fn order_count(&self, sku_id: &str) -> u64 {
        self.counts.get(sku_id).copied().unwrap_or(0)
    }
}

pub struct VelocityRanker {}

impl VelocityRanker {
    pub fn new() -> Self {
        Self {}
    }

    /// 依 sku_id 統計訂單數。只計入 SKU master 中存在的 SKU
    pub fn profile(&self, skus: &[Sku], orders: &[OrderLine]) -> VelocityProfile {
        let known: HashSet<&str> = skus.iter().map(|s| s.sku_id.as_str()).collect();
        let mut profile = VelocityProfile {
            orders_total: orders.len(),
            ..Default::default()
        };

        for order in orders {
            if known.contains(order.sku_id.as_str()) {
                *profile.counts.entry(order.sku_id.clone()).or_insert(0) += 1;
            } else {
                profile.ignored_unknown_sku += 1;
            }

            match parse_timestamp(&order.order_timestamp) {
                Some(ts) => {
                    profile.window = Some(match profile.window {
                        Some(w) => OrderWindow {
                            first: w.first.min(ts),
                            last: w.last.max(ts),
                        },
                        None => OrderWindow { first: ts, last: ts },
                    });
                }
                None => profile.unparseable_timestamps += 1,
            }
        }

        if profile.ignored_unknown_sku > 0 {
            tracing::debug!(
                "Ignored {} order lines referencing unknown SKUs",
                profile.ignored_unknown_sku
            );
        }
        if profile.unparseable_timestamps > 0 {
            tracing::debug!(
                "{} order timestamps could not be parsed",
                profile.unparseable_timestamps
            );
        }

        profile
    }

    /// 排序鍵：訂單數降序，同數量時 sku_id 升序
    pub fn rank(&self, skus: Vec<Sku>, profile: &VelocityProfile) -> Vec<RankedSku> {
        let mut ranked: Vec<RankedSku> = skus
            .into_iter()
            .map(|sku| {
                let order_count = profile.order_count(&sku.sku_id);
                RankedSku { sku, order_count }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.order_count
                .cmp(&a.order_count)
                .then_with(|| a.sku.sku_id.cmp(&b.sku.sku_id))
        });

        if let Some(top) = ranked.first() {
            tracing::debug!(
                "Top mover: {} with {} orders",
                top.sku.sku_id,
                top.order_count
            );
        }

        ranked
    }
}

impl Default for VelocityRanker {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
