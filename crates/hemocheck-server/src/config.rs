//! Server configuration

use crate::cli::Cli;
use config::{Config, Environment, File};
use hemocheck_classifiers::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Service name logged at startup
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,

    /// Model selection and artifact store
    #[serde(default)]
    pub engine: EngineConfig,
}

impl ServerConfig {
    /// Layer defaults, the optional YAML file, `HEMOCHECK_*` environment
    /// variables and CLI overrides, in that order
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(File::from(Path::new(config_path)).required(false))
            .add_source(
                Environment::with_prefix("HEMOCHECK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.apply_overrides(cli);
        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(model) = cli.model {
            self.engine.model_name = model;
        }

        if let Some(path) = &cli.model_path {
            self.engine.model_path = path.clone();
        }

        if let Some(listen) = &cli.listen {
            self.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            self.port = port;
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            listen: default_listen(),
            port: default_port(),
            body_limit: default_body_limit(),
            engine: EngineConfig::default(),
        }
    }
}

fn default_app_name() -> String {
    "Detect Anemia Service API".to_string()
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit() -> usize {
    16 * 1024
}
