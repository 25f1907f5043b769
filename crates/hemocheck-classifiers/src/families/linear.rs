//! Logistic regression

use crate::classifier::{check_features, dot, sigmoid, Classifier, PredictError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    /// Log-odds of the positive class
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_features(features, self.coef.len())?;
        let z = dot(&self.coef, features) + self.intercept;
        if !z.is_finite() {
            return Err(PredictError::NonFinite("decision value"));
        }
        Ok(z)
    }
}

impl Classifier for LogisticRegression {
    fn predict_label(&self, features: &[f64]) -> Result<u8, PredictError> {
        Ok(u8::from(self.decision_function(features)? > 0.0))
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictError> {
        self.decision_function(features).map(sigmoid)
    }

    fn type_tag(&self) -> &'static str {
        "LogisticRegression"
    }
}
