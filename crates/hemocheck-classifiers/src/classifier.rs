//! Classifier trait and common prediction helpers

/// Failure raised by a model while predicting
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    /// Feature vector length differs from what the model was fit on
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    /// Artifact content is internally inconsistent
    #[error("malformed model: {0}")]
    Malformed(String),

    /// Computation produced NaN or infinity
    #[error("non-finite {0} produced")]
    NonFinite(&'static str),
}

impl PredictError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Capability interface shared by every model family.
///
/// Implementations are immutable after loading, so a single instance can
/// serve concurrent requests.
pub trait Classifier: Send + Sync {
    /// Binary label (0 or 1) for one feature vector
    fn predict_label(&self, features: &[f64]) -> Result<u8, PredictError>;

    /// Probability of the positive class for one feature vector
    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictError>;

    /// Per-feature importance weights, for families that expose them
    fn importances(&self) -> Option<Vec<f64>> {
        None
    }

    /// Estimator type name
    fn type_tag(&self) -> &'static str;
}

/// Reject vectors whose length differs from the fitted feature count
pub(crate) fn check_features(features: &[f64], expected: usize) -> Result<(), PredictError> {
    if features.len() != expected {
        return Err(PredictError::FeatureCount {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Numerically stable logistic function
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Label by majority probability; an exact tie resolves to the negative class
pub(crate) fn label_from_probability(probability: f64) -> u8 {
    u8::from(probability > 0.5)
}
