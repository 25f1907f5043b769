//! Application state shared across all requests

use crate::config::ServerConfig;
use hemocheck_classifiers::EngineHandle;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Active classification engine, or the reason none is available
    pub engine: Arc<EngineHandle>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: ServerConfig, engine: EngineHandle) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            metrics_handle: None,
        }
    }

    /// Attach the installed Prometheus recorder
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
