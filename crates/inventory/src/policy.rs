use serde::{Deserialize, Serialize};
use tracing::debug;

use restock_core::{InventoryState, PlanError, PlanResult};

/// z multiplier for a ~95% one-sided service level.
pub const DEFAULT_SERVICE_LEVEL_Z: f64 = 1.65;

/// Inventory policy configuration.
///
/// Serialized as the bare z value; deserialization goes through
/// [`PolicyConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PolicyConfig {
    service_level_z: f64,
}

impl PolicyConfig {
    pub fn new(service_level_z: f64) -> PlanResult<Self> {
        if !(service_level_z.is_finite() && service_level_z >= 0.0) {
            return Err(PlanError::invalid_input(format!(
                "service level z must be a finite non-negative number (got {service_level_z})"
            )));
        }
        Ok(Self { service_level_z })
    }

    pub fn service_level_z(&self) -> f64 {
        self.service_level_z
    }
}

impl TryFrom<f64> for PolicyConfig {
    type Error = PlanError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PolicyConfig> for f64 {
    fn from(value: PolicyConfig) -> Self {
        value.service_level_z
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            service_level_z: DEFAULT_SERVICE_LEVEL_Z,
        }
    }
}

/// Outcome of the reorder-point policy for one SKU on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecommendation {
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub recommended_inventory: f64,
    pub should_reorder: bool,
}

/// Reorder-point inventory policy.
///
/// Model:
/// - `safety_stock = σ × z`
/// - `reorder_point = demand × lead_time + safety_stock`
/// - `recommended_inventory = demand + safety_stock`
/// - reorder when `stock < reorder_point` (strictly below)
///
/// Pure and deterministic; no IO.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InventoryPolicy {
    config: PolicyConfig,
}

impl InventoryPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn recommend(
        &self,
        demand: f64,
        lead_time: u32,
        current_stock: i64,
        sigma: f64,
    ) -> PlanResult<InventoryRecommendation> {
        let stock = InventoryState::new(current_stock)?;

        if !(demand.is_finite() && demand >= 0.0) {
            return Err(PlanError::invalid_input(format!(
                "demand must be finite and non-negative (got {demand})"
            )));
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(PlanError::invalid_input(format!(
                "demand standard deviation must be finite and non-negative (got {sigma})"
            )));
        }

        let safety_stock = sigma * self.config.service_level_z;
        let reorder_point = demand * f64::from(lead_time) + safety_stock;
        let recommended_inventory = demand + safety_stock;
        let should_reorder = (stock.stock() as f64) < reorder_point;

        debug!(
            safety_stock,
            reorder_point, recommended_inventory, should_reorder, "inventory policy evaluated"
        );

        Ok(InventoryRecommendation {
            safety_stock,
            reorder_point,
            recommended_inventory,
            should_reorder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn policy() -> InventoryPolicy {
        InventoryPolicy::default()
    }

    #[test]
    fn default_z_is_95_percent_service_level() {
        assert_eq!(policy().config().service_level_z(), 1.65);
    }

    #[test]
    fn five_day_lead_time_scenario() {
        let low = policy().recommend(20.0, 5, 100, 10.0).unwrap();
        assert!((low.safety_stock - 16.5).abs() < EPS);
        assert!((low.reorder_point - 116.5).abs() < EPS);
        assert!((low.recommended_inventory - 36.5).abs() < EPS);
        assert!(low.should_reorder);

        let high = policy().recommend(20.0, 5, 120, 10.0).unwrap();
        assert!(!high.should_reorder);
    }

    #[test]
    fn zero_lead_time_and_zero_sigma() {
        let r = policy().recommend(50.0, 0, 0, 0.0).unwrap();
        assert_eq!(r.safety_stock, 0.0);
        assert_eq!(r.reorder_point, 0.0);
        assert_eq!(r.recommended_inventory, 50.0);
        assert!(!r.should_reorder);
    }

    #[test]
    fn stock_equal_to_reorder_point_does_not_reorder() {
        // 10 × 3 + 0 = 30
        let r = policy().recommend(10.0, 3, 30, 0.0).unwrap();
        assert_eq!(r.reorder_point, 30.0);
        assert!(!r.should_reorder);
        assert!(policy().recommend(10.0, 3, 29, 0.0).unwrap().should_reorder);
    }

    #[test]
    fn z_is_configurable() {
        let p = InventoryPolicy::new(PolicyConfig::new(2.33).unwrap());
        let r = p.recommend(0.0, 0, 0, 10.0).unwrap();
        assert!((r.safety_stock - 23.3).abs() < EPS);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let p = policy();
        assert!(matches!(p.recommend(1.0, 1, -1, 0.0), Err(PlanError::InvalidInput(_))));
        assert!(matches!(p.recommend(-1.0, 1, 0, 0.0), Err(PlanError::InvalidInput(_))));
        assert!(matches!(p.recommend(1.0, 1, 0, -0.5), Err(PlanError::InvalidInput(_))));
        assert!(matches!(p.recommend(1.0, 1, 0, f64::NAN), Err(PlanError::InvalidInput(_))));
        assert!(matches!(PolicyConfig::new(-1.0), Err(PlanError::InvalidInput(_))));
    }

    #[test]
    fn deserialized_config_is_validated() {
        let cfg: PolicyConfig = serde_json::from_str("2.33").unwrap();
        assert_eq!(cfg.service_level_z(), 2.33);
        assert!(serde_json::from_str::<PolicyConfig>("-1.0").is_err());
        assert_eq!(serde_json::to_string(&PolicyConfig::default()).unwrap(), "1.65");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn policy_inequalities_hold(
            demand in 0.0f64..10_000.0,
            lead_time in 0u32..90,
            stock in 0i64..1_000_000,
            sigma in 0.0f64..1_000.0,
        ) {
            let r = policy().recommend(demand, lead_time, stock, sigma).unwrap();
            prop_assert!(r.reorder_point >= r.safety_stock);
            prop_assert!(r.recommended_inventory >= r.safety_stock);
            prop_assert_eq!(r.should_reorder, (stock as f64) < r.reorder_point);
            prop_assert_eq!(r, policy().recommend(demand, lead_time, stock, sigma).unwrap());
        }

        #[test]
        fn zero_sigma_degenerates(demand in 0.0f64..10_000.0, lead_time in 0u32..90) {
            let r = policy().recommend(demand, lead_time, 0, 0.0).unwrap();
            prop_assert_eq!(r.safety_stock, 0.0);
            prop_assert_eq!(r.reorder_point, demand * f64::from(lead_time));
            prop_assert_eq!(r.recommended_inventory, demand);
        }
    }
}
