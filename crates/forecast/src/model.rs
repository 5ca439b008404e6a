//! Trained demand models.
//!
//! The models are produced offline; this module only evaluates them. A model
//! declares the ordered feature names it was trained on so the predictor can
//! check the serving vector against them before evaluation.

use serde::{Deserialize, Serialize};

use restock_core::{PlanError, PlanResult};

/// An externally trained regression function from encoded features to demand.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait DemandModel: Send + Sync + 'static {
    /// Input columns, in training order.
    fn feature_names(&self) -> &[String];

    /// Evaluate the model. `features` has already been checked against
    /// [`DemandModel::feature_names`].
    fn predict(&self, features: &[f64]) -> f64;
}

/// Ordinary linear regression: `intercept + Σ coefficients[i] * x[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn validate(&self) -> PlanResult<()> {
        if self.coefficients.len() != self.feature_names.len() {
            return Err(PlanError::model_unavailable(format!(
                "linear model has {} coefficients for {} features",
                self.coefficients.len(),
                self.feature_names.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PlanError::model_unavailable(
                "linear model has non-finite parameters",
            ));
        }
        Ok(())
    }
}

impl DemandModel for LinearModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// A node of a regression tree, stored in a flat array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeNode {
    /// `x[feature] <= threshold` goes to `left`, otherwise `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// Regression tree; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Children must point forward in the array, which rules out cycles and
    /// guarantees evaluation terminates.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature}, model has {n_features}"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child index {child}"));
                        }
                    }
                }
                TreeNode::Leaf(value) => {
                    if !value.is_finite() {
                        return Err(format!("leaf {idx} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf(value) => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Random-forest style ensemble: the prediction is the mean of its trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub feature_names: Vec<String>,
    pub trees: Vec<RegressionTree>,
}

impl ForestModel {
    pub fn validate(&self) -> PlanResult<()> {
        if self.trees.is_empty() {
            return Err(PlanError::model_unavailable("forest model has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.feature_names.len())
                .map_err(|e| PlanError::model_unavailable(format!("forest tree {i}: {e}")))?;
        }
        Ok(())
    }
}

impl DemandModel for ForestModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.evaluate(features)).sum();
        total / (self.trees.len() as f64)
    }
}

/// Serialized model artifact, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    pub fn validate(&self) -> PlanResult<()> {
        match self {
            ModelArtifact::Linear(m) => m.validate(),
            ModelArtifact::Forest(m) => m.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::Forest(_) => "forest",
        }
    }
}

impl DemandModel for ModelArtifact {
    fn feature_names(&self) -> &[String] {
        match self {
            ModelArtifact::Linear(m) => m.feature_names(),
            ModelArtifact::Forest(m) => m.feature_names(),
        }
    }

    fn predict(&self, features: &[f64]) -> f64 {
        match self {
            ModelArtifact::Linear(m) => m.predict(features),
            ModelArtifact::Forest(m) => m.predict(features),
        }
    }
}
