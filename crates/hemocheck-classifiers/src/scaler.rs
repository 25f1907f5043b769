//! Fitted feature standardizer

use crate::classifier::{check_features, PredictError};
use serde::{Deserialize, Serialize};

/// Standardizes features as `(x - mean) / scale`.
///
/// Fitted offline on the same feature ordering the engine uses at inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize one feature vector into a fresh buffer
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        if self.mean.len() != self.scale.len() {
            return Err(PredictError::malformed(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        check_features(features, self.mean.len())?;

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant features were fit with zero spread
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(
            vec![0.5, 13.0, 27.0, 32.0, 88.0],
            vec![0.5, 2.0, 3.0, 1.0, 8.0],
        );
        let scaled = scaler.transform(&[1.0, 11.0, 24.0, 31.0, 80.0]).unwrap();
        assert_eq!(scaled, vec![1.0, -1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_zero_scale_treated_as_unit() {
        let scaler = StandardScaler::new(vec![1.0, 0.0], vec![0.0, 1.0]);
        assert_eq!(scaler.transform(&[3.0, 2.0]).unwrap(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_width_mismatch() {
        let scaler = StandardScaler::new(vec![0.0; 5], vec![1.0; 5]);
        assert!(scaler.transform(&[1.0; 4]).is_err());

        let lopsided = StandardScaler::new(vec![0.0; 5], vec![1.0; 4]);
        assert!(matches!(
            lopsided.transform(&[1.0; 5]),
            Err(PredictError::Malformed(_))
        ));
    }
}
