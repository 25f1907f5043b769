//! Configuration for model selection and artifact loading

use hemocheck_core::ModelKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration: which model to serve and where its artifacts live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Active model family
    #[serde(default = "default_model_name")]
    pub model_name: ModelKind,

    /// Artifact store root directory
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// What to do when a scaling family has no scaler artifact
    #[serde(default)]
    pub scaling_policy: ScalingPolicy,

    /// File extension of artifact documents
    #[serde(default = "default_artifact_extension")]
    pub artifact_extension: String,
}

/// Handling of a model family that requires scaling but has no scaler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingPolicy {
    /// Refuse to construct the engine
    #[default]
    Strict,
    /// Log a warning and run inference on raw features
    Permissive,
}

fn default_model_name() -> ModelKind {
    ModelKind::RandomForest
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models")
}

fn default_artifact_extension() -> String {
    "json".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            model_path: default_model_path(),
            scaling_policy: ScalingPolicy::default(),
            artifact_extension: default_artifact_extension(),
        }
    }
}

impl EngineConfig {
    /// Configuration for `model_name` under `model_path`, other settings default
    pub fn new(model_name: ModelKind, model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_name,
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// Set the scaling policy
    pub fn with_scaling_policy(mut self, policy: ScalingPolicy) -> Self {
        self.scaling_policy = policy;
        self
    }

    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> hemocheck_core::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| hemocheck_core::Error::config(e.to_string()))
    }
}
