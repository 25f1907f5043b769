//! Classification engine: one loaded model serving every request

use crate::classifier::Classifier;
use crate::config::{EngineConfig, ScalingPolicy};
use crate::model_loader::{LoadedArtifacts, ModelLoader};
use crate::scaler::StandardScaler;
use hemocheck_core::{
    ClassificationResult, Confidence, Error, FeatureImportance, ModelInfo, ModelKind, Result,
    Sample, N_FEATURES,
};
use tracing::{debug, info, warn};

/// Owns one `(classifier, scaler, name)` triple for its whole lifetime.
///
/// An engine only exists in the Ready state: every constructor either
/// returns a fully loaded engine or an error. All operations take `&self`
/// and allocate per call, so one instance can be shared across threads.
pub struct ClassificationEngine {
    kind: ModelKind,
    classifier: Box<dyn Classifier>,
    scaler: Option<StandardScaler>,
}

impl std::fmt::Debug for ClassificationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationEngine")
            .field("kind", &self.kind)
            .field("classifier", &self.classifier.type_tag())
            .field("scaler", &self.scaler)
            .finish()
    }
}

impl ClassificationEngine {
    /// Load the configured model's artifacts and construct a ready engine
    pub fn load(config: &EngineConfig) -> Result<Self> {
        let loader = ModelLoader::from_config(config);
        let LoadedArtifacts { classifier, scaler } = loader.load(config.model_name)?;
        Self::from_parts(config.model_name, classifier, scaler, config.scaling_policy)
    }

    /// Construct from an already deserialized classifier and scaler
    pub fn from_parts(
        kind: ModelKind,
        classifier: Box<dyn Classifier>,
        scaler: Option<StandardScaler>,
        policy: ScalingPolicy,
    ) -> Result<Self> {
        if kind.requires_scaling() && scaler.is_none() {
            match policy {
                ScalingPolicy::Strict => {
                    return Err(Error::ScalerRequiredButMissing { model: kind });
                }
                ScalingPolicy::Permissive => {
                    warn!(
                        model = %kind,
                        "Model requires scaling but no scaler was loaded; using raw features"
                    );
                }
            }
        }

        info!(
            model = %kind,
            model_type = classifier.type_tag(),
            has_scaler = scaler.is_some(),
            "Classification engine ready"
        );

        Ok(Self {
            kind,
            classifier,
            scaler,
        })
    }

    pub fn model_kind(&self) -> ModelKind {
        self.kind
    }

    /// Whether inputs pass through the scaler before inference
    pub fn applies_scaling(&self) -> bool {
        self.kind.requires_scaling() && self.scaler.is_some()
    }

    /// Ordered feature vector, standardized when the family requires it
    pub fn prepare_features(&self, sample: &Sample) -> Result<Vec<f64>> {
        let raw = sample.features();
        match &self.scaler {
            Some(scaler) if self.kind.requires_scaling() => scaler
                .transform(&raw)
                .map_err(|e| Error::inference(self.kind, e)),
            _ => Ok(raw.to_vec()),
        }
    }

    /// Classify one sample
    pub fn classify(&self, sample: &Sample) -> Result<ClassificationResult> {
        let features = self.prepare_features(sample)?;

        let prediction = self
            .classifier
            .predict_label(&features)
            .map_err(|e| Error::inference(self.kind, e))?;
        let probability = self
            .classifier
            .predict_probability(&features)
            .map_err(|e| Error::inference(self.kind, e))?;

        if prediction > 1 {
            return Err(Error::inference(
                self.kind,
                format!("label {} is not binary", prediction),
            ));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::inference(
                self.kind,
                format!("probability {} outside [0, 1]", probability),
            ));
        }

        let confidence = Confidence::from_probability(probability);
        debug!(
            model = %self.kind,
            prediction,
            probability,
            confidence = confidence.as_str(),
            "Sample classified"
        );

        Ok(ClassificationResult {
            prediction,
            probability,
            confidence,
            model_used: self.kind,
        })
    }

    /// Importance weights keyed by feature name; `None` when the family has none
    pub fn feature_importance(&self) -> Result<Option<FeatureImportance>> {
        let Some(weights) = self.classifier.importances() else {
            return Ok(None);
        };

        let weights: [f64; N_FEATURES] = weights.as_slice().try_into().map_err(|_| {
            Error::inference(
                self.kind,
                format!("expected {} importances, got {}", N_FEATURES, weights.len()),
            )
        })?;
        Ok(Some(FeatureImportance::from_weights(weights)))
    }

    /// Metadata about the active model; performs no inference
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.kind,
            model_type: self.classifier.type_tag().to_string(),
            has_scaler: self.scaler.is_some(),
            available_models: ModelKind::ALL.to_vec(),
        }
    }
}
