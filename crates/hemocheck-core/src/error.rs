//! Error types for HemoCheck

use crate::model_kind::ModelKind;
use std::path::PathBuf;

/// Result type alias using HemoCheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for HemoCheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier artifact missing for the configured model
    #[error("model file not found for '{model}': {}", path.display())]
    ArtifactNotFound { model: ModelKind, path: PathBuf },

    /// Classifier or scaler artifact present but not deserializable
    #[error("failed to load model {model} from {}: {reason}", path.display())]
    ArtifactCorrupt {
        model: ModelKind,
        path: PathBuf,
        reason: String,
    },

    /// Model family requires a scaler but none was loaded
    #[error("model {model} requires a feature scaler but none was loaded")]
    ScalerRequiredButMissing { model: ModelKind },

    /// No engine reached the Ready state
    #[error("classification service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    /// The underlying model failed during prediction
    #[error("inference failed for model {model}: {reason}")]
    Inference { model: ModelKind, reason: String },

    /// Sample failed input validation
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// Model name outside the supported set
    #[error("unknown model '{0}'")]
    UnknownModel(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors outside artifact loading
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new corrupt-artifact error
    pub fn artifact_corrupt(
        model: ModelKind,
        path: impl Into<PathBuf>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::ArtifactCorrupt {
            model,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new inference error
    pub fn inference(model: ModelKind, reason: impl std::fmt::Display) -> Self {
        Self::Inference {
            model,
            reason: reason.to_string(),
        }
    }

    /// Create a new service-unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a new invalid-sample error
    pub fn invalid_sample(msg: impl Into<String>) -> Self {
        Self::InvalidSample(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short stable label, used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArtifactNotFound { .. } => "artifact_not_found",
            Self::ArtifactCorrupt { .. } => "artifact_corrupt",
            Self::ScalerRequiredButMissing { .. } => "scaler_required_but_missing",
            Self::ServiceUnavailable { .. } => "service_unavailable",
            Self::Inference { .. } => "inference",
            Self::InvalidSample(_) => "invalid_sample",
            Self::UnknownModel(_) => "unknown_model",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}
