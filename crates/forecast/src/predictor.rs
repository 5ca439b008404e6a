//! Demand Predictor.
//!
//! Wraps an opaque [`DemandModel`] and guards it: the encoded vector must match
//! the model's schema exactly before the model is called, and the output is
//! clamped to be non-negative.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use restock_core::{PlanError, PlanResult, Sku};

use crate::encoder::EncodedFeatures;
use crate::features::FEATURE_NAMES;
use crate::model::DemandModel;

/// Predicted units to be sold in the forecast period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandEstimate {
    /// Non-negative demand used downstream.
    pub units: f64,
    /// Model output before clamping.
    pub raw: f64,
    /// `true` when `raw` was negative and `units` was clamped to 0.
    pub clamped: bool,
}

impl DemandEstimate {
    /// Clamp a raw model output. Non-finite output is an inference failure.
    pub fn from_raw(raw: f64) -> PlanResult<Self> {
        if !raw.is_finite() {
            return Err(PlanError::inference_failed(format!(
                "model returned a non-finite estimate ({raw})"
            )));
        }
        let clamped = raw < 0.0;
        Ok(Self {
            // `+ 0.0` turns -0.0 into 0.0
            units: if clamped { 0.0 } else { raw + 0.0 },
            raw,
            clamped,
        })
    }
}

/// Shape-checked front for a trained model.
#[derive(Clone)]
pub struct DemandPredictor {
    model: Arc<dyn DemandModel>,
}

impl core::fmt::Debug for DemandPredictor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DemandPredictor")
            .field("feature_names", &self.model.feature_names())
            .finish()
    }
}

impl DemandPredictor {
    /// Wrap `model`, checking that it was trained on the serving feature layout.
    pub fn new(model: Arc<dyn DemandModel>) -> PlanResult<Self> {
        check_schema(model.feature_names(), &FEATURE_NAMES[..])?;
        Ok(Self { model })
    }

    pub fn model(&self) -> &dyn DemandModel {
        self.model.as_ref()
    }

    pub fn predict(&self, sku: &Sku, features: &EncodedFeatures) -> PlanResult<DemandEstimate> {
        check_schema(features.names(), self.model.feature_names())?;

        if let Some((name, value)) = features
            .names()
            .iter()
            .zip(features.values())
            .find(|(_, v)| !v.is_finite())
        {
            return Err(PlanError::schema_mismatch(format!(
                "column `{name}` is not a finite number ({value})"
            )));
        }

        let raw = self.model.predict(features.values());
        let estimate = DemandEstimate::from_raw(raw)?;

        if estimate.clamped {
            warn!(%sku, raw_estimate = raw, "negative demand estimate clamped to 0");
        } else {
            debug!(%sku, units = estimate.units, "demand estimated");
        }

        Ok(estimate)
    }
}

/// Names must agree in count and order.
fn check_schema<A, B>(actual: &[A], expected: &[B]) -> PlanResult<()>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    if actual.len() != expected.len() {
        return Err(PlanError::schema_mismatch(format!(
            "expected {} features, got {}",
            expected.len(),
            actual.len()
        )));
    }
    for (pos, (a, e)) in actual.iter().zip(expected).enumerate() {
        if a.as_ref() != e.as_ref() {
            return Err(PlanError::schema_mismatch(format!(
                "feature {pos} is `{}`, expected `{}`",
                a.as_ref(),
                e.as_ref()
            )));
        }
    }
    Ok(())
}
