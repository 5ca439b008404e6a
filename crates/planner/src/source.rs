//! Storage collaborator contracts.
//!
//! The planner stays storage-agnostic: product master data and sales history
//! are provided by implementations living in other crates.

use restock_core::{HistoricalDemandSeries, ProductRecord, Sku};

use crate::error::PlanningError;

/// Product-master lookup.
pub trait ProductSource: Send + Sync + 'static {
    /// Static attributes of `sku` as of its most recent observation.
    ///
    /// Implementations own the selection policy (which observation is
    /// "latest") and must document it.
    fn latest_product(&self, sku: &Sku) -> Result<ProductRecord, PlanningError>;

    /// All known SKUs, sorted and de-duplicated.
    fn skus(&self) -> Result<Vec<Sku>, PlanningError>;
}

/// Which observations a demand history covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryQuery {
    Global,
    Sku(Sku),
}

/// Sales-history lookup.
pub trait DemandHistorySource: Send + Sync + 'static {
    /// Past units_sold observations in chronological order.
    fn demand_history(&self, query: &HistoryQuery) -> Result<HistoricalDemandSeries, PlanningError>;
}
