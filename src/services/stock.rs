//! Stock buckets derived from device names.

use crate::models::Device;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockBucket {
    Ont,
    TMobileCpe,
    Router,
    Decoder,
    Other,
}

impl StockBucket {
    pub const TRACKED: [StockBucket; 4] = [
        StockBucket::Ont,
        StockBucket::TMobileCpe,
        StockBucket::Router,
        StockBucket::Decoder,
    ];
}

fn is_ont(n: &str) -> bool {
    n.contains("ONT")
}

fn is_tmobile_cpe(n: &str) -> bool {
    n.contains("T-MOBILE") && n.contains("CPE")
}

fn is_router(n: &str) -> bool {
    n.contains("ROUTER")
}

fn is_decoder(n: &str) -> bool {
    n.contains("DEKODER") || n.contains("DECODER") || n.contains("STB")
}

/// Evaluated top to bottom against the upper-cased name; first match wins.
const BUCKET_RULES: &[(fn(&str) -> bool, StockBucket)] = &[
    (is_ont, StockBucket::Ont),
    (is_tmobile_cpe, StockBucket::TMobileCpe),
    (is_router, StockBucket::Router),
    (is_decoder, StockBucket::Decoder),
];

pub fn bucket_for(name: &str) -> StockBucket {
    let upper = name.to_uppercase();
    BUCKET_RULES
        .iter()
        .find(|(matches, _)| matches(upper.as_str()))
        .map(|(_, bucket)| *bucket)
        .unwrap_or(StockBucket::Other)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StockCounts {
    pub counts: BTreeMap<StockBucket, usize>,
}

impl StockCounts {
    pub fn get(&self, bucket: StockBucket) -> usize {
        self.counts.get(&bucket).copied().unwrap_or(0)
    }

    /// Tracked buckets holding fewer than `threshold` devices.
    pub fn low_stock(&self, threshold: usize) -> Vec<StockBucket> {
        StockBucket::TRACKED
            .into_iter()
            .filter(|b| self.get(*b) < threshold)
            .collect()
    }
}

pub fn count_by_bucket<'a, I>(devices: I) -> StockCounts
where
    I: IntoIterator<Item = &'a Device>,
{
    let mut counts = BTreeMap::new();
    for device in devices {
        *counts.entry(bucket_for(&device.name)).or_insert(0) += 1;
    }
    StockCounts { counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceStatus;

    fn device(name: &str) -> Device {
        Device {
            device_id: format!("dev_{}", name.len()),
            name: name.to_string(),
            serial_number: "SN1".to_string(),
            barcode: None,
            qr_code: None,
            assigned_to: None,
            status: DeviceStatus::Assigned,
        }
    }

    #[test]
    fn rules_apply_in_priority_order() {
        assert_eq!(bucket_for("ONT Huawei HG8245"), StockBucket::Ont);
        assert_eq!(bucket_for("t-mobile cpe 5G"), StockBucket::TMobileCpe);
        assert_eq!(bucket_for("T-Mobile router"), StockBucket::Router);
        assert_eq!(bucket_for("Router TP-Link"), StockBucket::Router);
        assert_eq!(bucket_for("Dekoder 4K"), StockBucket::Decoder);
        assert_eq!(bucket_for("Kabel UTP"), StockBucket::Other);
    }

    #[test]
    fn ont_rule_is_checked_before_cpe() {
        // Substring match: "FRONT" contains "ONT".
        assert_eq!(bucket_for("T-Mobile CPE front unit"), StockBucket::Ont);
    }

    #[test]
    fn counts_and_low_stock() {
        let devices = vec![
            device("ONT A"),
            device("ONT B"),
            device("Router TP-Link"),
            device("Kabel"),
        ];
        let stock = count_by_bucket(&devices);
        assert_eq!(stock.get(StockBucket::Ont), 2);
        assert_eq!(stock.get(StockBucket::Other), 1);
        assert_eq!(
            stock.low_stock(2),
            vec![StockBucket::TMobileCpe, StockBucket::Router, StockBucket::Decoder]
        );
    }
}
