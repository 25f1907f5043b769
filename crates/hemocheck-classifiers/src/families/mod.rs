//! Native implementations of the supported model families
//!
//! Each family is a plain serde struct matching its artifact document. The
//! model name alone decides which schema a document is read as.

pub mod ensemble;
pub mod linear;
pub mod naive_bayes;
pub mod neighbors;
pub mod svm;
pub mod tree;

pub use ensemble::{GradientBoosting, RandomForest};
pub use linear::LogisticRegression;
pub use naive_bayes::GaussianNaiveBayes;
pub use neighbors::KNearestNeighbors;
pub use svm::{Kernel, SupportVectorMachine};
pub use tree::{DecisionTree, Tree, TreeNode};

use crate::classifier::Classifier;
use hemocheck_core::ModelKind;

/// Deserialize a classifier artifact as the schema of `kind`
pub fn classifier_from_json(kind: ModelKind, json: &str) -> serde_json::Result<Box<dyn Classifier>> {
    let classifier: Box<dyn Classifier> = match kind {
        ModelKind::Logistic => Box::new(serde_json::from_str::<LogisticRegression>(json)?),
        ModelKind::RandomForest => Box::new(serde_json::from_str::<RandomForest>(json)?),
        ModelKind::GradientBoosting => Box::new(serde_json::from_str::<GradientBoosting>(json)?),
        ModelKind::Svm => Box::new(serde_json::from_str::<SupportVectorMachine>(json)?),
        ModelKind::Knn => Box::new(serde_json::from_str::<KNearestNeighbors>(json)?),
        ModelKind::DecisionTree => Box::new(serde_json::from_str::<DecisionTree>(json)?),
        ModelKind::NaiveBayes => Box::new(serde_json::from_str::<GaussianNaiveBayes>(json)?),
    };
    Ok(classifier)
}
