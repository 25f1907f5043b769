//! Gaussian naive Bayes

use crate::classifier::{check_features, Classifier, PredictError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Per-class Gaussian likelihoods with independent features.
///
/// Index 0 of every per-class array is the negative class, index 1 the positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaussianNaiveBayes {
    pub class_prior: Vec<f64>,
    /// Per-class feature means
    pub theta: Vec<Vec<f64>>,
    /// Per-class feature variances
    pub var: Vec<Vec<f64>>,
}

impl GaussianNaiveBayes {
    /// Joint log-likelihood `[negative, positive]`
    pub fn joint_log_likelihood(&self, features: &[f64]) -> Result<[f64; 2], PredictError> {
        if self.class_prior.len() != 2 || self.theta.len() != 2 || self.var.len() != 2 {
            return Err(PredictError::malformed("expected parameters for exactly two classes"));
        }

        let mut jll = [0.0; 2];
        for (class, slot) in jll.iter_mut().enumerate() {
            let theta = &self.theta[class];
            let var = &self.var[class];
            check_features(features, theta.len())?;
            check_features(features, var.len())?;

            let prior = self.class_prior[class];
            if prior <= 0.0 {
                return Err(PredictError::malformed(format!(
                    "class {} prior must be positive",
                    class
                )));
            }

            let mut log_likelihood = prior.ln();
            for ((x, mean), variance) in features.iter().zip(theta).zip(var) {
                if *variance <= 0.0 {
                    return Err(PredictError::malformed("variance must be positive"));
                }
                log_likelihood -= 0.5 * (2.0 * PI * variance).ln();
                log_likelihood -= 0.5 * (x - mean).powi(2) / variance;
            }
            *slot = log_likelihood;
        }

        if jll.iter().any(|v| !v.is_finite()) {
            return Err(PredictError::NonFinite("log-likelihood"));
        }
        Ok(jll)
    }
}

impl Classifier for GaussianNaiveBayes {
    fn predict_label(&self, features: &[f64]) -> Result<u8, PredictError> {
        let [negative, positive] = self.joint_log_likelihood(features)?;
        Ok(u8::from(positive > negative))
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictError> {
        let [negative, positive] = self.joint_log_likelihood(features)?;
        let max = negative.max(positive);
        let log_norm = max + ((negative - max).exp() + (positive - max).exp()).ln();
        Ok((positive - log_norm).exp())
    }

    fn type_tag(&self) -> &'static str {
        "GaussianNB"
    }
}
