//! Tree ensembles: bagged random forests and gradient-boosted trees

use super::tree::{normalize_in_place, Tree};
use crate::classifier::{check_features, label_from_probability, sigmoid, Classifier, PredictError};
use serde::{Deserialize, Serialize};

/// Random forest: positive-class probability averaged over trees
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

impl Classifier for RandomForest {
    fn predict_label(&self, features: &[f64]) -> Result<u8, PredictError> {
        self.predict_probability(features)
            .map(label_from_probability)
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_features(features, self.n_features)?;
        if self.trees.is_empty() {
            return Err(PredictError::malformed("forest has no trees"));
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.leaf_value(features)?;
        }
        Ok(total / self.trees.len() as f64)
    }

    fn importances(&self) -> Option<Vec<f64>> {
        let per_tree: Vec<Vec<f64>> = self
            .trees
            .iter()
            .filter(|tree| tree.has_splits())
            .map(|tree| tree.feature_importances(self.n_features, true))
            .collect();

        let mut importances = mean_columns(&per_tree, self.n_features);
        normalize_in_place(&mut importances);
        Some(importances)
    }

    fn type_tag(&self) -> &'static str {
        "RandomForestClassifier"
    }
}

/// Binary gradient boosting on log-odds with regression-tree stages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradientBoosting {
    pub n_features: usize,
    /// Raw log-odds before the first stage
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<Tree>,
}

impl GradientBoosting {
    /// Additive raw score (log-odds of the positive class)
    pub fn raw_score(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_features(features, self.n_features)?;

        let mut raw = self.init;
        for tree in &self.trees {
            raw += self.learning_rate * tree.leaf_value(features)?;
        }
        if !raw.is_finite() {
            return Err(PredictError::NonFinite("raw score"));
        }
        Ok(raw)
    }
}

impl Classifier for GradientBoosting {
    fn predict_label(&self, features: &[f64]) -> Result<u8, PredictError> {
        self.predict_probability(features)
            .map(label_from_probability)
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictError> {
        self.raw_score(features).map(sigmoid)
    }

    fn importances(&self) -> Option<Vec<f64>> {
        let per_tree: Vec<Vec<f64>> = self
            .trees
            .iter()
            .filter(|tree| tree.has_splits())
            .map(|tree| tree.feature_importances(self.n_features, false))
            .collect();

        let mut importances = mean_columns(&per_tree, self.n_features);
        normalize_in_place(&mut importances);
        Some(importances)
    }

    fn type_tag(&self) -> &'static str {
        "GradientBoostingClassifier"
    }
}

fn mean_columns(rows: &[Vec<f64>], width: usize) -> Vec<f64> {
    let mut mean = vec![0.0; width];
    if rows.is_empty() {
        return mean;
    }
    for row in rows {
        for (acc, value) in mean.iter_mut().zip(row) {
            *acc += value;
        }
    }
    mean.iter_mut().for_each(|v| *v /= rows.len() as f64);
    mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::tree::tests::{hemoglobin_tree, leaf, split};

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> Tree {
        Tree::new(vec![
            split(feature, threshold, 1, 2, 0.5, 10.0),
            leaf(left, 0.0, 5.0),
            leaf(right, 0.0, 5.0),
        ])
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = RandomForest {
            n_features: 5,
            trees: vec![stump(1, 12.0, 1.0, 0.0), stump(2, 25.0, 0.8, 0.2)],
        };
        let p = forest
            .predict_probability(&[0.0, 11.0, 30.0, 32.0, 90.0])
            .unwrap();
        assert!((p - 0.6).abs() < 1e-12);
        assert_eq!(forest.predict_label(&[0.0, 11.0, 30.0, 32.0, 90.0]).unwrap(), 1);
    }

    #[test]
    fn test_empty_forest_is_malformed() {
        let forest = RandomForest {
            n_features: 5,
            trees: vec![],
        };
        assert!(forest.predict_probability(&[1.0; 5]).is_err());
    }

    #[test]
    fn test_forest_importances_skip_leaf_only_trees() {
        let forest = RandomForest {
            n_features: 5,
            trees: vec![
                stump(1, 12.0, 1.0, 0.0),
                Tree::new(vec![leaf(0.5, 0.5, 10.0)]),
            ],
        };
        let importances = forest.importances().unwrap();
        assert_eq!(importances, vec![0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_boosting_adds_scaled_stages() {
        let model = GradientBoosting {
            n_features: 5,
            init: -0.5,
            learning_rate: 0.1,
            trees: vec![stump(1, 12.0, 3.0, -3.0), stump(4, 80.0, 2.0, -1.0)],
        };
        let x = [1.0, 10.0, 20.0, 28.0, 75.0];
        let raw = model.raw_score(&x).unwrap();
        assert!((raw - (-0.5 + 0.3 + 0.2)).abs() < 1e-12);
        assert!((model.predict_probability(&x).unwrap() - 0.5).abs() < 1e-12);

        let healthy = [0.0, 15.0, 30.0, 34.0, 95.0];
        assert_eq!(model.predict_label(&healthy).unwrap(), 0);
    }

    #[test]
    fn test_boosting_importances_sum_to_one() {
        let model = GradientBoosting {
            n_features: 5,
            init: 0.0,
            learning_rate: 0.1,
            trees: vec![hemoglobin_tree(), stump(3, 31.0, 1.0, -1.0)],
        };
        let importances = model.importances().unwrap();
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(importances[1] > 0.0 && importances[3] > 0.0);
        assert_eq!(importances[0], 0.0);
    }
}
