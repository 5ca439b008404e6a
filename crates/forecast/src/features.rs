//! Feature Vector Builder.
//!
//! Assembles the fixed-order model input from product master attributes, the
//! decision date and the live stock level. The field set and order below are
//! the serving half of the training/serving compatibility contract.

use chrono::NaiveDate;
use serde::Serialize;

use restock_core::{CalendarFeatures, InventoryState, PlanResult, ProductRecord};

/// Model input columns, in the order the model was trained on.
pub const FEATURE_NAMES: [&str; 17] = [
    "sku",
    "brand",
    "segment",
    "category",
    "channel",
    "region",
    "pack_type",
    "price_unit",
    "promotion_flag",
    "delivery_days",
    "stock_available",
    "year",
    "month",
    "week",
    "day",
    "weekday",
    "is_weekend",
];

/// Columns that go through the encoding vocabulary.
pub const CATEGORICAL_FIELDS: [&str; 7] = [
    "sku",
    "brand",
    "segment",
    "category",
    "channel",
    "region",
    "pack_type",
];

/// A single, not yet encoded, feature value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Categorical(&'a str),
    Numeric(f64),
}

/// Raw (pre-encoding) feature vector for one SKU on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub sku: String,
    pub brand: String,
    pub segment: String,
    pub category: String,
    pub channel: String,
    pub region: String,
    pub pack_type: String,
    pub price_unit: f64,
    pub promotion_flag: bool,
    pub delivery_days: u32,
    pub stock_available: u64,
    pub calendar: CalendarFeatures,
}

impl FeatureVector {
    /// Build the vector for `product` on `date` with `stock` units on hand.
    ///
    /// Categorical values are whitespace-trimmed here; the encoder does exact
    /// matching only.
    pub fn build(product: &ProductRecord, date: NaiveDate, stock: i64) -> PlanResult<Self> {
        let inventory = InventoryState::new(stock)?;
        Self::from_parts(product, CalendarFeatures::from_date(date), inventory)
    }

    pub fn from_parts(
        product: &ProductRecord,
        calendar: CalendarFeatures,
        inventory: InventoryState,
    ) -> PlanResult<Self> {
        product.validate()?;

        Ok(Self {
            sku: product.sku.as_str().to_string(),
            brand: normalize(&product.brand),
            segment: normalize(&product.segment),
            category: normalize(&product.category),
            channel: normalize(&product.channel),
            region: normalize(&product.region),
            pack_type: normalize(&product.pack_type),
            price_unit: product.price_unit,
            promotion_flag: product.promotion_flag,
            delivery_days: product.delivery_days,
            stock_available: inventory.stock(),
            calendar,
        })
    }

    /// All fields as `(name, value)` pairs in [`FEATURE_NAMES`] order.
    pub fn fields(&self) -> [(&'static str, FeatureValue<'_>); 17] {
        use FeatureValue::{Categorical, Numeric};

        let c = &self.calendar;
        [
            ("sku", Categorical(&self.sku)),
            ("brand", Categorical(&self.brand)),
            ("segment", Categorical(&self.segment)),
            ("category", Categorical(&self.category)),
            ("channel", Categorical(&self.channel)),
            ("region", Categorical(&self.region)),
            ("pack_type", Categorical(&self.pack_type)),
            ("price_unit", Numeric(self.price_unit)),
            ("promotion_flag", Numeric(flag(self.promotion_flag))),
            ("delivery_days", Numeric(f64::from(self.delivery_days))),
            ("stock_available", Numeric(self.stock_available as f64)),
            ("year", Numeric(f64::from(c.year()))),
            ("month", Numeric(f64::from(c.month()))),
            ("week", Numeric(f64::from(c.week()))),
            ("day", Numeric(f64::from(c.day()))),
            ("weekday", Numeric(f64::from(c.weekday()))),
            ("is_weekend", Numeric(flag(c.is_weekend()))),
        ]
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_string()
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
