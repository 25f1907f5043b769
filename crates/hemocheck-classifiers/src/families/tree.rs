//! Binary decision trees shared by the tree-based families

use crate::classifier::{check_features, label_from_probability, Classifier, PredictError};
use serde::{Deserialize, Serialize};

/// One node of a fitted tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node: `x[feature] <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default)]
        impurity: f64,
        #[serde(default)]
        weighted_samples: f64,
    },

    /// Terminal node. For classification trees `value` is the positive-class
    /// fraction; for boosting stages it is the additive raw score.
    Leaf {
        value: f64,
        #[serde(default)]
        impurity: f64,
        #[serde(default)]
        weighted_samples: f64,
    },
}

impl TreeNode {
    fn impurity(&self) -> f64 {
        match self {
            Self::Split { impurity, .. } | Self::Leaf { impurity, .. } => *impurity,
        }
    }

    fn weighted_samples(&self) -> f64 {
        match self {
            Self::Split {
                weighted_samples, ..
            }
            | Self::Leaf {
                weighted_samples, ..
            } => *weighted_samples,
        }
    }
}

/// Flat node array of a fitted tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Leaf value reached by `features`
    pub fn leaf_value(&self, features: &[f64]) -> Result<f64, PredictError> {
        if self.nodes.is_empty() {
            return Err(PredictError::malformed("tree has no nodes"));
        }

        let mut index = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..self.nodes.len() {
            let node = self
                .nodes
                .get(index)
                .ok_or_else(|| PredictError::malformed(format!("node {} out of range", index)))?;

            match node {
                TreeNode::Leaf { value, .. } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    let x = features.get(*feature).ok_or_else(|| {
                        PredictError::malformed(format!(
                            "split on feature {} of {}",
                            feature,
                            features.len()
                        ))
                    })?;
                    index = if *x <= *threshold { *left } else { *right };
                }
            }
        }

        Err(PredictError::malformed("tree traversal did not reach a leaf"))
    }

    /// Whether the tree has at least one split
    pub fn has_splits(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, TreeNode::Split { .. }))
    }

    /// Impurity-decrease importance per feature, weighted by node sample counts.
    ///
    /// Without normalization the totals are divided by the root's weighted
    /// sample count; with it they are further scaled to sum to one.
    pub fn feature_importances(&self, n_features: usize, normalize: bool) -> Vec<f64> {
        let mut importances = vec![0.0; n_features];

        for node in &self.nodes {
            if let TreeNode::Split {
                feature,
                left,
                right,
                impurity,
                weighted_samples,
                ..
            } = node
            {
                let (Some(l), Some(r)) = (self.nodes.get(*left), self.nodes.get(*right)) else {
                    continue;
                };
                if let Some(slot) = importances.get_mut(*feature) {
                    *slot += weighted_samples * impurity
                        - l.weighted_samples() * l.impurity()
                        - r.weighted_samples() * r.impurity();
                }
            }
        }

        let root_samples = self.nodes.first().map_or(0.0, TreeNode::weighted_samples);
        if root_samples > 0.0 {
            importances.iter_mut().for_each(|v| *v /= root_samples);
        }

        if normalize {
            normalize_in_place(&mut importances);
        }
        importances
    }
}

/// Scale to unit sum; an all-zero vector stays zero
pub(crate) fn normalize_in_place(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter_mut().for_each(|v| *v /= total);
    }
}

/// Single decision tree classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionTree {
    pub n_features: usize,
    pub nodes: Tree,
}

impl Classifier for DecisionTree {
    fn predict_label(&self, features: &[f64]) -> Result<u8, PredictError> {
        self.predict_probability(features)
            .map(label_from_probability)
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_features(features, self.n_features)?;
        self.nodes.leaf_value(features)
    }

    fn importances(&self) -> Option<Vec<f64>> {
        Some(self.nodes.feature_importances(self.n_features, true))
    }

    fn type_tag(&self) -> &'static str {
        "DecisionTreeClassifier"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn split(
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        impurity: f64,
        weighted_samples: f64,
    ) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
            impurity,
            weighted_samples,
        }
    }

    pub(crate) fn leaf(value: f64, impurity: f64, weighted_samples: f64) -> TreeNode {
        TreeNode::Leaf {
            value,
            impurity,
            weighted_samples,
        }
    }

    /// hemoglobin <= 12.0 → anemic leaf, otherwise split on mcv
    pub(crate) fn hemoglobin_tree() -> Tree {
        Tree::new(vec![
            split(1, 12.0, 1, 2, 0.5, 100.0),
            leaf(0.9, 0.18, 40.0),
            split(4, 80.0, 3, 4, 0.2, 60.0),
            leaf(0.6, 0.48, 10.0),
            leaf(0.05, 0.095, 50.0),
        ])
    }

    #[test]
    fn test_traversal() {
        let tree = hemoglobin_tree();
        assert_eq!(tree.leaf_value(&[0.0, 11.0, 25.0, 30.0, 85.0]).unwrap(), 0.9);
        assert_eq!(tree.leaf_value(&[0.0, 12.0, 25.0, 30.0, 85.0]).unwrap(), 0.9);
        assert_eq!(tree.leaf_value(&[0.0, 14.0, 25.0, 30.0, 75.0]).unwrap(), 0.6);
        assert_eq!(tree.leaf_value(&[0.0, 14.0, 25.0, 30.0, 95.0]).unwrap(), 0.05);
    }

    #[test]
    fn test_cycle_is_malformed() {
        let tree = Tree::new(vec![split(0, 0.5, 0, 0, 0.0, 0.0)]);
        assert!(matches!(
            tree.leaf_value(&[1.0; 5]),
            Err(PredictError::Malformed(_))
        ));
    }

    #[test]
    fn test_out_of_range_child_is_malformed() {
        let tree = Tree::new(vec![split(0, 0.5, 7, 8, 0.0, 0.0), leaf(1.0, 0.0, 0.0)]);
        assert!(tree.leaf_value(&[1.0; 5]).is_err());
    }

    #[test]
    fn test_importances_from_impurity_decrease() {
        let tree = hemoglobin_tree();
        let raw = tree.feature_importances(5, false);
        // root: 100*0.5 - 40*0.18 - 60*0.2 = 30.8; mcv split: 60*0.2 - 10*0.48 - 50*0.095 = 2.45
        assert!((raw[1] - 0.308).abs() < 1e-12);
        assert!((raw[4] - 0.0245).abs() < 1e-12);
        assert_eq!(raw[0], 0.0);

        let normalized = tree.feature_importances(5, true);
        assert!((normalized.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(normalized[1] > normalized[4]);
    }

    #[test]
    fn test_decision_tree_classifier() {
        let model = DecisionTree {
            n_features: 5,
            nodes: hemoglobin_tree(),
        };
        assert_eq!(model.predict_label(&[1.0, 10.5, 20.0, 28.0, 70.0]).unwrap(), 1);
        assert_eq!(model.predict_label(&[0.0, 15.0, 30.0, 34.0, 92.0]).unwrap(), 0);
        assert!(model.predict_probability(&[1.0; 4]).is_err());
        assert_eq!(model.importances().unwrap().len(), 5);
    }
}
