//! Artifact resolution and loading

use crate::classifier::Classifier;
use crate::config::EngineConfig;
use crate::families::classifier_from_json;
use crate::scaler::StandardScaler;
use hemocheck_core::{Error, ModelKind, Result, N_FEATURES};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolved artifact locations for one model name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

/// A deserialized classifier and its optional scaler
pub struct LoadedArtifacts {
    pub classifier: Box<dyn Classifier>,
    pub scaler: Option<StandardScaler>,
}

impl std::fmt::Debug for LoadedArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedArtifacts")
            .field("classifier", &self.classifier.type_tag())
            .field("scaler", &self.scaler)
            .finish()
    }
}

/// Loader for classifier and scaler artifacts under one root directory
#[derive(Debug, Clone)]
pub struct ModelLoader {
    root: PathBuf,
    extension: String,
}

impl ModelLoader {
    /// Create a loader for JSON artifacts under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "json".to_string(),
        }
    }

    /// Create a loader from engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            root: config.model_path.clone(),
            extension: config.artifact_extension.clone(),
        }
    }

    /// `<root>/<name>_model.<ext>` and `<root>/<name>_scaler.<ext>`; no I/O
    pub fn resolve_artifact_paths(&self, model: ModelKind) -> ArtifactPaths {
        ArtifactPaths {
            model: self
                .root
                .join(format!("{}_model.{}", model, self.extension)),
            scaler: self
                .root
                .join(format!("{}_scaler.{}", model, self.extension)),
        }
    }

    /// Load the classifier and, when its file exists, the scaler.
    ///
    /// A missing classifier is `ArtifactNotFound`; a missing scaler is not an
    /// error. Any read or parse failure of an existing file is `ArtifactCorrupt`.
    pub fn load(&self, model: ModelKind) -> Result<LoadedArtifacts> {
        let paths = self.resolve_artifact_paths(model);

        if !paths.model.exists() {
            return Err(Error::ArtifactNotFound {
                model,
                path: paths.model,
            });
        }

        info!(model = %model, path = %paths.model.display(), "Loading model artifact");
        let content = read_artifact(model, &paths.model)?;
        let classifier = classifier_from_json(model, &content)
            .map_err(|e| Error::artifact_corrupt(model, &paths.model, e))?;

        let scaler = if paths.scaler.exists() {
            info!(model = %model, path = %paths.scaler.display(), "Loading scaler artifact");
            let content = read_artifact(model, &paths.scaler)?;
            let scaler: StandardScaler = serde_json::from_str(&content)
                .map_err(|e| Error::artifact_corrupt(model, &paths.scaler, e))?;
            if scaler.n_features() != N_FEATURES || scaler.scale.len() != N_FEATURES {
                return Err(Error::artifact_corrupt(
                    model,
                    &paths.scaler,
                    format!(
                        "scaler fit on {} means and {} scales, expected {}",
                        scaler.n_features(),
                        scaler.scale.len(),
                        N_FEATURES
                    ),
                ));
            }
            Some(scaler)
        } else {
            debug!(model = %model, path = %paths.scaler.display(), "No scaler artifact");
            None
        };

        info!(
            model = %model,
            model_type = classifier.type_tag(),
            has_scaler = scaler.is_some(),
            "Model loaded successfully"
        );

        Ok(LoadedArtifacts { classifier, scaler })
    }

    /// Model families whose inputs are standardized before inference
    pub fn models_requiring_scaling() -> &'static [ModelKind] {
        &ModelKind::REQUIRING_SCALING
    }
}

fn read_artifact(model: ModelKind, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::artifact_corrupt(model, path, e))
}
