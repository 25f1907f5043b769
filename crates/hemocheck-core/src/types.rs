//! Core types for HemoCheck

use crate::error::{Error, Result};
use crate::model_kind::ModelKind;
use serde::{Deserialize, Serialize};

/// Number of input features every model family consumes
pub const N_FEATURES: usize = 5;

/// Feature names in the order models and scalers were trained on
pub const FEATURE_NAMES: [&str; N_FEATURES] = ["gender", "hemoglobin", "mch", "mchc", "mcv"];

/// One blood-test sample to classify
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Gender (0 for male, 1 for female)
    pub gender: u8,

    /// Hemoglobin level (g/dL)
    pub hemoglobin: f64,

    /// Mean Corpuscular Hemoglobin (pg)
    pub mch: f64,

    /// Mean Corpuscular Hemoglobin Concentration (g/dL)
    pub mchc: f64,

    /// Mean Corpuscular Volume (fL)
    pub mcv: f64,
}

impl Sample {
    /// Create a validated sample
    pub fn new(gender: u8, hemoglobin: f64, mch: f64, mchc: f64, mcv: f64) -> Result<Self> {
        let sample = Self {
            gender,
            hemoglobin,
            mch,
            mchc,
            mcv,
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Check gender is 0 or 1 and every measurement is a positive finite number
    pub fn validate(&self) -> Result<()> {
        if self.gender > 1 {
            return Err(Error::invalid_sample(format!(
                "gender must be 0 or 1, got {}",
                self.gender
            )));
        }

        let measurements = [
            ("hemoglobin", self.hemoglobin),
            ("mch", self.mch),
            ("mchc", self.mchc),
            ("mcv", self.mcv),
        ];
        for (name, value) in measurements {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_sample(format!(
                    "{} must be greater than 0, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Ordered feature vector `[gender, hemoglobin, mch, mchc, mcv]`
    pub fn features(&self) -> [f64; N_FEATURES] {
        [
            f64::from(self.gender),
            self.hemoglobin,
            self.mch,
            self.mchc,
            self.mcv,
        ]
    }
}

/// Discretized certainty of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Bucket the positive-class probability.
    ///
    /// Branches are evaluated top to bottom with strict comparisons:
    /// the tails (`p < 0.30` or `p > 0.70`) are High, the shoulders
    /// (`p < 0.40` or `p > 0.60`) are Medium, and `[0.40, 0.60]` is Low.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 || probability > 0.7 {
            Self::High
        } else if probability < 0.4 || probability > 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Outcome of classifying one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Classification result (0: no anemia, 1: anemia)
    pub prediction: u8,

    /// Probability of the anemic class (0.0-1.0)
    pub probability: f64,

    /// Confidence bucket derived from the probability
    pub confidence: Confidence,

    /// Model family that served the request
    pub model_used: ModelKind,
}

/// Per-feature importance weights, one per input feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub gender: f64,
    pub hemoglobin: f64,
    pub mch: f64,
    pub mchc: f64,
    pub mcv: f64,
}

impl FeatureImportance {
    /// Pair weights with feature names in the fixed feature order
    pub fn from_weights(weights: [f64; N_FEATURES]) -> Self {
        let [gender, hemoglobin, mch, mchc, mcv] = weights;
        Self {
            gender,
            hemoglobin,
            mch,
            mchc,
            mcv,
        }
    }

    pub fn weights(&self) -> [f64; N_FEATURES] {
        [self.gender, self.hemoglobin, self.mch, self.mchc, self.mcv]
    }

    /// `(name, weight)` pairs in feature order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.weights())
    }
}

/// Metadata about the active model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: ModelKind,
    pub model_type: String,
    pub has_scaler: bool,
    pub available_models: Vec<ModelKind>,
}
