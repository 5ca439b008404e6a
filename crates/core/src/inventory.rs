//! Live inventory state supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// On-hand stock for a SKU at decision time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryState {
    stock: u64,
}

impl InventoryState {
    /// Callers hand over a signed quantity; anything below zero is rejected.
    pub fn new(stock: i64) -> PlanResult<Self> {
        u64::try_from(stock)
            .map(|stock| Self { stock })
            .map_err(|_| PlanError::invalid_input(format!("stock cannot be negative (got {stock})")))
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }
}
