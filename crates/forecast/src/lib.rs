//! `restock-forecast`
//!
//! **Responsibility:** turn a product snapshot into a demand estimate.
//!
//! - Feature Vector Builder: product + date + stock → ordered feature vector.
//! - Categorical Encoder: closed-vocabulary lookups, never a silent default.
//! - Demand Predictor: schema-checked call into an externally trained model.
//!
//! The model and vocabularies are loaded once ([`Artifacts`]) and passed in
//! explicitly; nothing here holds global state.

pub mod artifacts;
pub mod encoder;
pub mod features;
pub mod model;
pub mod predictor;
pub mod vocabulary;

pub use artifacts::{Artifacts, read_model, read_vocabulary};
pub use encoder::{CategoricalEncoder, EncodedFeatures};
pub use features::{CATEGORICAL_FIELDS, FEATURE_NAMES, FeatureValue, FeatureVector};
pub use model::{DemandModel, ForestModel, LinearModel, ModelArtifact, RegressionTree, TreeNode};
pub use predictor::{DemandEstimate, DemandPredictor};
pub use vocabulary::{EncodingVocabulary, FieldVocabulary};
