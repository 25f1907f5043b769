//! The enumerated set of supported model families

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven classifier families the service can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Logistic,
    RandomForest,
    GradientBoosting,
    Svm,
    Knn,
    DecisionTree,
    NaiveBayes,
}

impl ModelKind {
    /// Every supported family, in the order advertised to callers
    pub const ALL: [ModelKind; 7] = [
        ModelKind::Logistic,
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
        ModelKind::Svm,
        ModelKind::Knn,
        ModelKind::DecisionTree,
        ModelKind::NaiveBayes,
    ];

    /// Families trained on standardized inputs
    pub const REQUIRING_SCALING: [ModelKind; 3] =
        [ModelKind::Logistic, ModelKind::Svm, ModelKind::Knn];

    /// Artifact-store name of this family
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logistic => "logistic",
            Self::RandomForest => "random_forest",
            Self::GradientBoosting => "gradient_boosting",
            Self::Svm => "svm",
            Self::Knn => "knn",
            Self::DecisionTree => "decision_tree",
            Self::NaiveBayes => "naive_bayes",
        }
    }

    /// Whether inputs must be standardized before inference
    pub fn requires_scaling(&self) -> bool {
        Self::REQUIRING_SCALING.contains(self)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownModel(s.to_string()))
    }
}
