//! Loading of the offline-trained artifacts.
//!
//! Done once at process start. Any failure here is `ModelUnavailable`; the
//! resulting handles are immutable and shared read-only by every decision.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use restock_core::{PlanError, PlanResult};

use crate::encoder::CategoricalEncoder;
use crate::features::CATEGORICAL_FIELDS;
use crate::model::{DemandModel, ModelArtifact};
use crate::predictor::DemandPredictor;
use crate::vocabulary::EncodingVocabulary;

/// Read and check a vocabulary JSON document.
pub fn read_vocabulary<R: Read>(reader: R) -> PlanResult<EncodingVocabulary> {
    let vocab: EncodingVocabulary = serde_json::from_reader(reader)
        .map_err(|e| PlanError::model_unavailable(format!("cannot parse vocabulary: {e}")))?;
    vocab.require_fields(&CATEGORICAL_FIELDS)?;
    Ok(vocab)
}

/// Read and check a model JSON document.
pub fn read_model<R: Read>(reader: R) -> PlanResult<ModelArtifact> {
    let model: ModelArtifact = serde_json::from_reader(reader)
        .map_err(|e| PlanError::model_unavailable(format!("cannot parse model: {e}")))?;
    model.validate()?;
    Ok(model)
}

fn open(path: &Path, what: &str) -> PlanResult<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| {
        PlanError::model_unavailable(format!("cannot open {what} {}: {e}", path.display()))
    })
}

/// Immutable handles to the loaded vocabulary and model.
#[derive(Debug, Clone)]
pub struct Artifacts {
    encoder: CategoricalEncoder,
    predictor: DemandPredictor,
}

impl Artifacts {
    /// Assemble from already-loaded parts; checks the model against the
    /// serving feature layout.
    pub fn new(vocabulary: Arc<EncodingVocabulary>, model: Arc<dyn DemandModel>) -> PlanResult<Self> {
        vocabulary.require_fields(&CATEGORICAL_FIELDS)?;
        let predictor = DemandPredictor::new(model).map_err(|e| match e {
            PlanError::SchemaMismatch(msg) => {
                PlanError::model_unavailable(format!("model does not match serving schema: {msg}"))
            }
            other => other,
        })?;
        Ok(Self {
            encoder: CategoricalEncoder::new(vocabulary),
            predictor,
        })
    }

    pub fn load(vocabulary_path: impl AsRef<Path>, model_path: impl AsRef<Path>) -> PlanResult<Self> {
        let vocabulary_path = vocabulary_path.as_ref();
        let model_path = model_path.as_ref();

        let vocabulary = read_vocabulary(open(vocabulary_path, "vocabulary")?)?;
        let model = read_model(open(model_path, "model")?)?;

        info!(
            vocabulary = %vocabulary_path.display(),
            model = %model_path.display(),
            model_kind = model.kind(),
            "artifacts loaded"
        );

        Self::new(Arc::new(vocabulary), Arc::new(model))
    }

    pub fn encoder(&self) -> &CategoricalEncoder {
        &self.encoder
    }

    pub fn predictor(&self) -> &DemandPredictor {
        &self.predictor
    }
}
