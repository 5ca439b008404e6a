use thiserror::Error;

use restock_core::{PlanError, Sku};

/// Errors of a storage-backed decision.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanningError {
    /// The pipeline itself rejected the decision.
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("product {0} not found")]
    ProductNotFound(Sku),

    /// A storage collaborator failed.
    #[error("data source error: {0}")]
    Source(String),
}

impl PlanningError {
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}
