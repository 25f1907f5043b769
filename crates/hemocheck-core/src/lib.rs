//! HemoCheck Core
//!
//! Core types and error handling shared across HemoCheck components.
//!
//! This crate provides:
//! - The blood-test sample and the fixed five-feature ordering
//! - The enumerated set of supported model families
//! - Classification results, confidence buckets and introspection types
//! - Error types and result handling

pub mod error;
pub mod model_kind;
pub mod types;

pub use error::{Error, Result};
pub use model_kind::ModelKind;
pub use types::{
    ClassificationResult, Confidence, FeatureImportance, ModelInfo, Sample, FEATURE_NAMES,
    N_FEATURES,
};
