//! Support vector classifier with Platt-scaled probabilities

use crate::classifier::{check_features, dot, sigmoid, Classifier, PredictError};
use serde::{Deserialize, Serialize};

/// Kernel function used by the fitted support vector machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: i32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    pub fn apply(&self, a: &[f64], b: &[f64]) -> f64 {
        match *self {
            Self::Linear => dot(a, b),
            Self::Rbf { gamma } => {
                let sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
                (-gamma * sq).exp()
            }
            Self::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * dot(a, b) + coef0).powi(degree),
            Self::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportVectorMachine {
    pub kernel: Kernel,
    pub support_vectors: Vec<Vec<f64>>,
    /// Signed dual coefficients, one per support vector
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    /// Platt scaling slope
    pub prob_a: f64,
    /// Platt scaling offset
    pub prob_b: f64,
}

impl SupportVectorMachine {
    /// Signed distance from the separating surface; positive means class 1
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, PredictError> {
        if self.support_vectors.is_empty() {
            return Err(PredictError::malformed("no support vectors"));
        }
        if self.support_vectors.len() != self.dual_coef.len() {
            return Err(PredictError::malformed(format!(
                "{} support vectors but {} dual coefficients",
                self.support_vectors.len(),
                self.dual_coef.len()
            )));
        }

        let mut f = self.intercept;
        for (sv, alpha) in self.support_vectors.iter().zip(&self.dual_coef) {
            check_features(features, sv.len())?;
            f += alpha * self.kernel.apply(sv, features);
        }

        if !f.is_finite() {
            return Err(PredictError::NonFinite("decision value"));
        }
        Ok(f)
    }
}

impl Classifier for SupportVectorMachine {
    fn predict_label(&self, features: &[f64]) -> Result<u8, PredictError> {
        Ok(u8::from(self.decision_function(features)? > 0.0))
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictError> {
        let f = self.decision_function(features)?;
        // 1 / (1 + exp(A*f + B))
        Ok(sigmoid(-(self.prob_a * f + self.prob_b)))
    }

    fn type_tag(&self) -> &'static str {
        "SVC"
    }
}
