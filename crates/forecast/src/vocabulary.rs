//! Training-time encoding vocabularies.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;

use restock_core::{PlanError, PlanResult};

/// Closed value → code mapping for one categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFieldVocabulary")]
pub struct FieldVocabulary {
    codes: HashMap<String, u32>,
}

/// On-disk shapes accepted for a field vocabulary.
///
/// `Classes` follows the label-encoder convention (code = position in the
/// list); `Codes` spells the mapping out.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawFieldVocabulary {
    Classes(Vec<String>),
    Codes(BTreeMap<String, u32>),
}

impl FieldVocabulary {
    pub fn from_classes<I, S>(classes: I) -> PlanResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut codes = HashMap::new();
        for (idx, class) in classes.into_iter().enumerate() {
            let class = class.into();
            let code = u32::try_from(idx)
                .map_err(|_| PlanError::model_unavailable("vocabulary has too many classes"))?;
            if codes.insert(class.clone(), code).is_some() {
                return Err(PlanError::model_unavailable(format!(
                    "duplicate class {class:?} in vocabulary"
                )));
            }
        }
        Ok(Self { codes })
    }

    pub fn from_codes<I, S>(pairs: I) -> PlanResult<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut codes = HashMap::new();
        let mut seen = HashSet::new();
        for (value, code) in pairs {
            let value = value.into();
            if !seen.insert(code) {
                return Err(PlanError::model_unavailable(format!(
                    "code {code} is assigned to more than one value"
                )));
            }
            if codes.insert(value.clone(), code).is_some() {
                return Err(PlanError::model_unavailable(format!(
                    "duplicate value {value:?} in vocabulary"
                )));
            }
        }
        Ok(Self { codes })
    }

    /// Exact-match lookup.
    pub fn code(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl TryFrom<RawFieldVocabulary> for FieldVocabulary {
    type Error = PlanError;

    fn try_from(raw: RawFieldVocabulary) -> Result<Self, Self::Error> {
        match raw {
            RawFieldVocabulary::Classes(classes) => Self::from_classes(classes),
            RawFieldVocabulary::Codes(codes) => Self::from_codes(codes),
        }
    }
}

/// One [`FieldVocabulary`] per categorical field, keyed by field name.
///
/// Immutable once constructed; shared read-only between decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct EncodingVocabulary {
    fields: BTreeMap<String, FieldVocabulary>,
}

impl EncodingVocabulary {
    pub fn new(fields: impl IntoIterator<Item = (String, FieldVocabulary)>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldVocabulary> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fail unless every field in `required` has a vocabulary.
    pub fn require_fields(&self, required: &[&str]) -> PlanResult<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|f| !self.fields.contains_key(*f))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PlanError::model_unavailable(format!(
                "vocabulary is missing field(s): {}",
                missing.join(", ")
            )))
        }
    }
}
