//! One row of the sales export.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use restock_core::{ProductRecord, Sku};

/// Raw sales observation as found in the CSV export. Columns not listed here
/// are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesRow {
    pub date: NaiveDate,
    pub sku: String,
    pub brand: String,
    pub segment: String,
    pub category: String,
    pub channel: String,
    pub region: String,
    pub pack_type: String,
    pub price_unit: f64,
    #[serde(deserialize_with = "flag")]
    pub promotion_flag: bool,
    pub delivery_days: u32,
    pub units_sold: f64,
}

impl SalesRow {
    pub fn product(&self, sku: Sku) -> ProductRecord {
        ProductRecord {
            sku,
            brand: self.brand.trim().to_string(),
            category: self.category.trim().to_string(),
            segment: self.segment.trim().to_string(),
            pack_type: self.pack_type.trim().to_string(),
            channel: self.channel.trim().to_string(),
            region: self.region.trim().to_string(),
            price_unit: self.price_unit,
            promotion_flag: self.promotion_flag,
            delivery_days: self.delivery_days,
        }
    }
}

/// Accepts `0`/`1` as well as `true`/`false`.
fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(d)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid flag {other:?}"))),
    }
}
