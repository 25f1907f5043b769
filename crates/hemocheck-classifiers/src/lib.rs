//! HemoCheck Classifiers
//!
//! Model serving for anemia classification.
//!
//! The pieces, leaf first:
//! - [`families`]: native implementations of the seven supported model
//!   families behind the [`Classifier`] capability trait
//! - [`scaler`]: the fitted feature standardizer paired with scaling families
//! - [`model_loader`]: resolves a model name to its artifacts and deserializes them
//! - [`engine`]: owns one loaded model and serves classification and introspection
//! - [`handle`]: the Ready/Unavailable state holder shared by callers

pub mod classifier;
pub mod config;
pub mod engine;
pub mod families;
pub mod handle;
pub mod model_loader;
pub mod scaler;

pub use classifier::{Classifier, PredictError};
pub use config::{EngineConfig, ScalingPolicy};
pub use engine::ClassificationEngine;
pub use handle::{EngineHandle, EngineState};
pub use model_loader::{ArtifactPaths, LoadedArtifacts, ModelLoader};
pub use scaler::StandardScaler;
