//! Storage-backed decisions.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use restock_core::{HistoricalDemandSeries, ProductRecord, Sku};
use restock_inventory::{VolatilityScope, demand_sigma};

use crate::error::PlanningError;
use crate::pipeline::{InventoryDecision, Planner};
use crate::source::{DemandHistorySource, HistoryQuery, ProductSource};

/// Resolves the product and σ through the storage collaborators, then runs the
/// [`Planner`].
pub struct PlanningService<P, H> {
    planner: Arc<Planner>,
    products: Arc<P>,
    history: Arc<H>,
    scope: VolatilityScope,
}

impl<P, H> PlanningService<P, H>
where
    P: ProductSource,
    H: DemandHistorySource,
{
    pub fn new(planner: Arc<Planner>, products: Arc<P>, history: Arc<H>) -> Self {
        Self {
            planner,
            products,
            history,
            scope: VolatilityScope::default(),
        }
    }

    pub fn with_volatility_scope(mut self, scope: VolatilityScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn volatility_scope(&self) -> VolatilityScope {
        self.scope
    }

    pub fn skus(&self) -> Result<Vec<Sku>, PlanningError> {
        self.products.skus()
    }

    pub fn product(&self, sku: &Sku) -> Result<ProductRecord, PlanningError> {
        self.products.latest_product(sku)
    }

    /// Chronological units_sold for one SKU.
    pub fn history(&self, sku: &Sku) -> Result<HistoricalDemandSeries, PlanningError> {
        self.history.demand_history(&HistoryQuery::Sku(sku.clone()))
    }

    /// σ for `sku` under the configured scope.
    pub fn sigma(&self, sku: &Sku) -> Result<f64, PlanningError> {
        let query = match self.scope {
            VolatilityScope::Global => HistoryQuery::Global,
            VolatilityScope::PerSku => HistoryQuery::Sku(sku.clone()),
        };
        let series = self.history.demand_history(&query)?;
        let sigma = demand_sigma(&series);
        debug!(%sku, scope = %self.scope, observations = series.len(), sigma, "demand volatility");
        Ok(sigma)
    }

    pub fn decide(
        &self,
        sku: &Sku,
        date: NaiveDate,
        stock: i64,
    ) -> Result<InventoryDecision, PlanningError> {
        let product = self.products.latest_product(sku)?;
        let sigma = self.sigma(sku)?;
        Ok(self.planner.decide(&product, date, stock, sigma)?)
    }
}
