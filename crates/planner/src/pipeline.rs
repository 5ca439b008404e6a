//! The forecast-to-policy pipeline: Builder → Encoder → Predictor → Policy.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, info_span};

use restock_core::{PlanResult, ProductRecord, Sku};
use restock_forecast::{Artifacts, DemandEstimate, FeatureVector};
use restock_inventory::{InventoryPolicy, InventoryRecommendation};

/// Everything produced by one decision. Created and discarded per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryDecision {
    pub sku: Sku,
    pub date: NaiveDate,
    pub stock: u64,
    pub features: FeatureVector,
    pub demand: DemandEstimate,
    /// Demand standard deviation fed into the safety-stock term.
    pub sigma: f64,
    pub recommendation: InventoryRecommendation,
}

/// Stateless decision engine over immutable, shared artifacts.
///
/// `Planner` is `Send + Sync`; concurrent decisions need no coordination.
#[derive(Debug, Clone)]
pub struct Planner {
    artifacts: Artifacts,
    policy: InventoryPolicy,
}

impl Planner {
    pub fn new(artifacts: Artifacts, policy: InventoryPolicy) -> Self {
        Self { artifacts, policy }
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    pub fn policy(&self) -> &InventoryPolicy {
        &self.policy
    }

    /// Run one decision. Every stage fails fast; no stage's error is replaced
    /// by a default value.
    pub fn decide(
        &self,
        product: &ProductRecord,
        date: NaiveDate,
        stock: i64,
        sigma: f64,
    ) -> PlanResult<InventoryDecision> {
        let span = info_span!("decision", sku = %product.sku, %date, stock);
        let _guard = span.enter();

        let features = FeatureVector::build(product, date, stock)?;
        let encoded = self.artifacts.encoder().encode(&features)?;
        let demand = self.artifacts.predictor().predict(&product.sku, &encoded)?;
        debug!(units = demand.units, clamped = demand.clamped, "forecast complete");

        let recommendation =
            self.policy
                .recommend(demand.units, product.lead_time(), stock, sigma)?;

        info!(
            demand = demand.units,
            sigma,
            reorder_point = recommendation.reorder_point,
            should_reorder = recommendation.should_reorder,
            "decision made"
        );

        Ok(InventoryDecision {
            sku: product.sku.clone(),
            date,
            stock: features.stock_available,
            features,
            demand,
            sigma,
            recommendation,
        })
    }
}
