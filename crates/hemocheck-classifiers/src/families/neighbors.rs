//! k-nearest-neighbours vote

use crate::classifier::{check_features, label_from_probability, Classifier, PredictError};
use serde::{Deserialize, Serialize};

/// Uniformly weighted k-NN over stored training points
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KNearestNeighbors {
    pub k: usize,
    pub points: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

impl KNearestNeighbors {
    fn validate(&self) -> Result<(), PredictError> {
        if self.points.len() != self.labels.len() {
            return Err(PredictError::malformed(format!(
                "{} points but {} labels",
                self.points.len(),
                self.labels.len()
            )));
        }
        if self.k == 0 || self.k > self.points.len() {
            return Err(PredictError::malformed(format!(
                "k = {} with {} stored points",
                self.k,
                self.points.len()
            )));
        }
        if let Some(bad) = self.labels.iter().find(|label| **label > 1) {
            return Err(PredictError::malformed(format!("label {} is not binary", bad)));
        }
        Ok(())
    }
}

impl Classifier for KNearestNeighbors {
    fn predict_label(&self, features: &[f64]) -> Result<u8, PredictError> {
        self.predict_probability(features)
            .map(label_from_probability)
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictError> {
        self.validate()?;

        let mut distances = Vec::with_capacity(self.points.len());
        for (index, point) in self.points.iter().enumerate() {
            check_features(features, point.len())?;
            let sq: f64 = point
                .iter()
                .zip(features)
                .map(|(a, b)| (a - b).powi(2))
                .sum();
            distances.push((sq, index));
        }

        // Stable sort keeps storage order among equidistant points
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));

        let positives = distances
            .iter()
            .take(self.k)
            .filter(|(_, index)| self.labels[*index] == 1)
            .count();
        Ok(positives as f64 / self.k as f64)
    }

    fn type_tag(&self) -> &'static str {
        "KNeighborsClassifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(k: usize) -> KNearestNeighbors {
        KNearestNeighbors {
            k,
            points: vec![
                vec![0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.1, 0.0, 0.0, 0.0, 0.0],
                vec![0.2, 0.0, 0.0, 0.0, 0.0],
                vec![5.0, 5.0, 5.0, 5.0, 5.0],
                vec![5.1, 5.0, 5.0, 5.0, 5.0],
            ],
            labels: vec![1, 1, 0, 0, 0],
        }
    }

    #[test]
    fn test_vote_share() {
        let m = model(3);
        let p = m.predict_probability(&[0.0; 5]).unwrap();
        assert!((p - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.predict_label(&[0.0; 5]).unwrap(), 1);
        assert_eq!(m.predict_label(&[5.0; 5]).unwrap(), 0);
    }

    #[test]
    fn test_even_split_is_negative() {
        let m = model(4);
        // Nearest four to the origin: labels 1, 1, 0, 0
        assert_eq!(m.predict_probability(&[0.0; 5]).unwrap(), 0.5);
        assert_eq!(m.predict_label(&[0.0; 5]).unwrap(), 0);
    }

    #[test]
    fn test_invalid_k() {
        assert!(model(0).predict_probability(&[0.0; 5]).is_err());
        assert!(model(6).predict_probability(&[0.0; 5]).is_err());
    }
}
