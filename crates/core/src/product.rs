//! Product master attributes used as model features.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::sku::Sku;

/// Static attributes of a SKU as of its most recent observation.
///
/// Read once per decision from the product-master collaborator and never
/// mutated while the decision runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub sku: Sku,
    pub brand: String,
    pub category: String,
    pub segment: String,
    pub pack_type: String,
    pub channel: String,
    pub region: String,
    /// Unit price, non-negative.
    pub price_unit: f64,
    pub promotion_flag: bool,
    /// Supplier lead time in days.
    pub delivery_days: u32,
}

impl ProductRecord {
    pub fn validate(&self) -> PlanResult<()> {
        if !(self.price_unit.is_finite() && self.price_unit >= 0.0) {
            return Err(PlanError::invalid_input(format!(
                "price_unit for sku {} must be a finite non-negative number (got {})",
                self.sku, self.price_unit
            )));
        }
        Ok(())
    }

    /// Lead time as used by the reorder-point formula.
    pub fn lead_time(&self) -> u32 {
        self.delivery_days
    }
}
