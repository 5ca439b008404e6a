//! Stock-keeping unit identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Identifier of a sellable product variant.
///
/// Surrounding whitespace is stripped on construction so that `" A1 "` and
/// `"A1"` refer to the same product, matching how SKUs were keyed at training
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PlanError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PlanError::invalid_input("sku cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Sku {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Sku {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Sku> for String {
    fn from(value: Sku) -> Self {
        value.0
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_is_trimmed() {
        let sku: Sku = "  MI-006 ".parse().unwrap();
        assert_eq!(sku.as_str(), "MI-006");
    }

    #[test]
    fn blank_sku_is_rejected() {
        assert!(matches!(Sku::new("   "), Err(PlanError::InvalidInput(_))));
    }

    #[test]
    fn sku_deserializes_through_validation() {
        let sku: Sku = serde_json::from_str("\" A1\"").unwrap();
        assert_eq!(sku, Sku::new("A1").unwrap());
        assert!(serde_json::from_str::<Sku>("\"\"").is_err());
    }
}
