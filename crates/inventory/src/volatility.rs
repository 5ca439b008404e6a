//! Demand volatility (σ) for the safety-stock term.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use restock_core::{HistoricalDemandSeries, PlanError};

/// Which sales history σ is computed over.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolatilityScope {
    /// All units_sold observations across every SKU.
    #[default]
    Global,
    /// Only the decided SKU's own observations.
    PerSku,
}

impl VolatilityScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityScope::Global => "global",
            VolatilityScope::PerSku => "per-sku",
        }
    }
}

impl core::fmt::Display for VolatilityScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolatilityScope {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(VolatilityScope::Global),
            "per-sku" | "per_sku" | "sku" => Ok(VolatilityScope::PerSku),
            other => Err(PlanError::invalid_input(format!(
                "unknown volatility scope {other:?} (expected `global` or `per-sku`)"
            ))),
        }
    }
}

/// σ of a demand series: sample standard deviation, 0 when fewer than two
/// observations exist.
pub fn demand_sigma(series: &HistoricalDemandSeries) -> f64 {
    series.std_dev()
}
