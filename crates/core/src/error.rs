//! Decision error model.

use thiserror::Error;

/// Result type used across the decision pipeline.
pub type PlanResult<T> = Result<T, PlanError>;

/// Pipeline-level error.
///
/// Every variant is deterministic given the same inputs and artifacts, so none
/// of them is retryable. Stages return these up the call chain unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    /// Malformed or out-of-range caller input (negative stock, invalid date, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A categorical value that the training-time vocabulary never saw.
    #[error("unknown category for field `{field}`: {value:?}")]
    UnknownCategory { field: String, value: String },

    /// The encoded feature vector does not match the model's input contract.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Vocabularies or model could not be loaded (startup failure).
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model produced a value that cannot be interpreted as demand.
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

impl PlanError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unknown_category(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownCategory {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }

    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    pub fn inference_failed(msg: impl Into<String>) -> Self {
        Self::InferenceFailed(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_names_field_and_value() {
        let err = PlanError::unknown_category("brand", "Acme");
        assert_eq!(
            err.to_string(),
            "unknown category for field `brand`: \"Acme\""
        );
    }
}
