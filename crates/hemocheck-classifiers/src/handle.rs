//! Shared engine handle with explicit availability and atomic reload

use crate::config::EngineConfig;
use crate::engine::ClassificationEngine;
use hemocheck_core::{Error, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info};

/// Availability of the classification engine
#[derive(Debug, Clone)]
pub enum EngineState {
    /// An engine finished loading and serves requests
    Ready(Arc<ClassificationEngine>),
    /// No engine could be constructed
    Unavailable { reason: String },
}

/// Process-wide holder of the active engine.
///
/// Readers clone the inner `Arc` and release the lock before doing any work.
/// A reload replaces the whole engine in one write, never individual fields.
#[derive(Debug)]
pub struct EngineHandle {
    state: RwLock<EngineState>,
}

impl EngineHandle {
    /// Handle around an engine that is already Ready
    pub fn ready(engine: ClassificationEngine) -> Self {
        Self {
            state: RwLock::new(EngineState::Ready(Arc::new(engine))),
        }
    }

    /// Handle with no engine; every engine request fails with `ServiceUnavailable`
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(EngineState::Unavailable {
                reason: reason.into(),
            }),
        }
    }

    /// Attempt construction, keeping the failure as an Unavailable state
    pub fn initialize(config: &EngineConfig) -> Self {
        match ClassificationEngine::load(config) {
            Ok(engine) => Self::ready(engine),
            Err(e) => {
                error!(model = %config.model_name, error = %e, "Failed to initialize classification engine");
                Self::unavailable(e.to_string())
            }
        }
    }

    /// The active engine, or `ServiceUnavailable`
    pub fn engine(&self) -> Result<Arc<ClassificationEngine>> {
        match &*self.state.read() {
            EngineState::Ready(engine) => Ok(Arc::clone(engine)),
            EngineState::Unavailable { reason } => Err(Error::unavailable(reason.clone())),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> EngineState {
        self.state.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.read(), EngineState::Ready(_))
    }

    /// Build a new engine from `config` and swap it in.
    ///
    /// The previous state stays in place if loading fails. In-flight requests
    /// finish on the engine they already hold.
    pub fn reload(&self, config: &EngineConfig) -> Result<()> {
        let engine = ClassificationEngine::load(config)?;
        *self.state.write() = EngineState::Ready(Arc::new(engine));
        info!(model = %config.model_name, "Classification engine reloaded");
        Ok(())
    }
}
