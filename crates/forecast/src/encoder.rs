//! Categorical Encoder.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use restock_core::{PlanError, PlanResult};

use crate::features::{FeatureValue, FeatureVector};
use crate::vocabulary::EncodingVocabulary;

/// Fully numeric, named, ordered model input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedFeatures {
    names: Vec<String>,
    values: Vec<f64>,
}

impl EncodedFeatures {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (names, values) = pairs.into_iter().map(|(n, v)| (n.into(), v)).unzip();
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values[idx])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of `self` without the named column.
    pub fn without(&self, name: &str) -> Self {
        Self::from_pairs(
            self.names
                .iter()
                .zip(&self.values)
                .filter(|(n, _)| n.as_str() != name)
                .map(|(n, v)| (n.clone(), *v)),
        )
    }
}

/// Replaces categorical feature values with their training-time codes.
///
/// Lookups are exact and the vocabulary is closed: a value the vocabulary does
/// not know fails the whole encoding with `UnknownCategory`.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    vocabulary: Arc<EncodingVocabulary>,
}

impl CategoricalEncoder {
    pub fn new(vocabulary: Arc<EncodingVocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &EncodingVocabulary {
        &self.vocabulary
    }

    pub fn encode(&self, features: &FeatureVector) -> PlanResult<EncodedFeatures> {
        let mut pairs = Vec::with_capacity(17);

        for (name, value) in features.fields() {
            let encoded = match value {
                FeatureValue::Numeric(x) => x,
                FeatureValue::Categorical(raw) => f64::from(self.code(name, raw)?),
            };
            pairs.push((name, encoded));
        }

        debug!(columns = pairs.len(), "feature vector encoded");
        Ok(EncodedFeatures::from_pairs(pairs))
    }

    fn code(&self, field: &str, value: &str) -> PlanResult<u32> {
        let vocab = self.vocabulary.field(field).ok_or_else(|| {
            PlanError::schema_mismatch(format!("no vocabulary for categorical field `{field}`"))
        })?;
        vocab
            .code(value)
            .ok_or_else(|| PlanError::unknown_category(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{CATEGORICAL_FIELDS, FEATURE_NAMES};
    use crate::vocabulary::FieldVocabulary;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use restock_core::{ProductRecord, Sku};

    fn vocabulary() -> Arc<EncodingVocabulary> {
        let classes: [(&str, &[&str]); 7] = [
            ("sku", &["A1", "B2", "C3"]),
            ("brand", &["Brand-A", "Brand-B"]),
            ("segment", &["Milk-Seg1", "Milk-Seg2"]),
            ("category", &["Milk", "Yogurt"]),
            ("channel", &["Discount", "Retail"]),
            ("region", &["PL-Central", "PL-North"]),
            ("pack_type", &["Multipack", "Single"]),
        ];
        Arc::new(EncodingVocabulary::new(classes.iter().map(|(field, cls)| {
            (
                field.to_string(),
                FieldVocabulary::from_classes(cls.iter().copied()).unwrap(),
            )
        })))
    }

    fn product(sku: &str, brand: &str) -> ProductRecord {
        ProductRecord {
            sku: Sku::new(sku).unwrap(),
            brand: brand.to_string(),
            category: "Yogurt".to_string(),
            segment: "Milk-Seg2".to_string(),
            pack_type: "Single".to_string(),
            channel: "Retail".to_string(),
            region: "PL-North".to_string(),
            price_unit: 3.2,
            promotion_flag: false,
            delivery_days: 4,
        }
    }

    fn features(sku: &str, brand: &str) -> FeatureVector {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        FeatureVector::build(&product(sku, brand), date, 40).unwrap()
    }

    #[test]
    fn encodes_categoricals_and_keeps_numerics() {
        let encoder = CategoricalEncoder::new(vocabulary());
        let encoded = encoder.encode(&features("B2", "Brand-B")).unwrap();

        assert_eq!(encoded.names(), FEATURE_NAMES.map(String::from).as_slice());
        assert_eq!(encoded.get("sku"), Some(1.0));
        assert_eq!(encoded.get("brand"), Some(1.0));
        assert_eq!(encoded.get("segment"), Some(1.0));
        assert_eq!(encoded.get("category"), Some(1.0));
        assert_eq!(encoded.get("channel"), Some(1.0));
        assert_eq!(encoded.get("region"), Some(1.0));
        assert_eq!(encoded.get("pack_type"), Some(1.0));
        assert_eq!(encoded.get("price_unit"), Some(3.2));
        assert_eq!(encoded.get("stock_available"), Some(40.0));
        assert_eq!(encoded.get("weekday"), Some(0.0));
    }

    #[test]
    fn unseen_value_is_unknown_category() {
        let encoder = CategoricalEncoder::new(vocabulary());
        let err = encoder.encode(&features("A1", "Brand-Z")).unwrap_err();
        assert_eq!(err, PlanError::unknown_category("brand", "Brand-Z"));
    }

    #[test]
    fn missing_field_vocabulary_is_schema_mismatch() {
        let full = vocabulary();
        let partial = EncodingVocabulary::new(
            full.field_names()
                .filter(|f| *f != "region")
                .map(|f| (f.to_string(), full.field(f).unwrap().clone()))
                .collect::<Vec<_>>(),
        );
        let encoder = CategoricalEncoder::new(Arc::new(partial));
        let err = encoder.encode(&features("A1", "Brand-A")).unwrap_err();
        assert!(matches!(err, PlanError::SchemaMismatch(_)));
    }

    #[test]
    fn without_drops_a_single_column() {
        let encoder = CategoricalEncoder::new(vocabulary());
        let encoded = encoder.encode(&features("A1", "Brand-A")).unwrap();
        let short = encoded.without("week");
        assert_eq!(short.len(), encoded.len() - 1);
        assert_eq!(short.get("week"), None);
        assert_eq!(short.get("day"), encoded.get("day"));
    }

    proptest! {
        #[test]
        fn known_values_always_encode_to_the_same_code(sku_idx in 0usize..3, brand_idx in 0usize..2) {
            let skus = ["A1", "B2", "C3"];
            let brands = ["Brand-A", "Brand-B"];
            let encoder = CategoricalEncoder::new(vocabulary());
            let fv = features(skus[sku_idx], brands[brand_idx]);

            let first = encoder.encode(&fv).unwrap();
            let second = encoder.encode(&fv).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.get("sku"), Some(sku_idx as f64));
            prop_assert_eq!(first.get("brand"), Some(brand_idx as f64));
        }

        #[test]
        fn unknown_values_never_encode(brand in "[a-z]{1,12}") {
            let encoder = CategoricalEncoder::new(vocabulary());
            let err = encoder.encode(&features("A1", &brand)).unwrap_err();
            prop_assert_eq!(err, PlanError::unknown_category("brand", brand.as_str()));
        }
    }

    #[test]
    fn encoder_covers_every_categorical_field() {
        let vocab = vocabulary();
        assert!(vocab.require_fields(&CATEGORICAL_FIELDS).is_ok());
    }
}
