//! HemoCheck Server
//!
//! Serves anemia classification over HTTP from a single model loaded at
//! startup.

use anyhow::Result;
use clap::Parser;
use hemocheck_classifiers::{ClassificationEngine, EngineHandle};
use hemocheck_server::{create_router, AppState, Cli, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting HemoCheck Server");

    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Starting {}", config.app_name);
    info!("Model: {}", config.engine.model_name);
    info!("Model path: {}", config.engine.model_path.display());
    info!("Scaling policy: {:?}", config.engine.scaling_policy);

    let metrics_handle = init_metrics()?;

    // Model loading happens once, before the listener accepts traffic
    let engine = if cli.strict_startup {
        let engine = ClassificationEngine::load(&config.engine).map_err(|e| {
            error!(error = %e, "Failed to load model, aborting (--strict-startup)");
            e
        })?;
        EngineHandle::ready(engine)
    } else {
        EngineHandle::initialize(&config.engine)
    };

    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let state = AppState::new(config, engine).with_metrics(metrics_handle);

    #[cfg(unix)]
    tokio::spawn(reload_on_hangup(state.clone()));

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Rebuild the engine from the current engine configuration on every SIGHUP
#[cfg(unix)]
async fn reload_on_hangup(state: AppState) {
    let mut hangup = match signal::unix::signal(signal::unix::SignalKind::hangup()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "SIGHUP handler unavailable, hot reload disabled");
            return;
        }
    };

    while hangup.recv().await.is_some() {
        info!("SIGHUP received, reloading model");
        if let Err(e) = state.engine.reload(&state.config.engine) {
            metrics::counter!("hemocheck_errors_total", "kind" => "reload").increment(1);
            error!(error = %e, "Model reload failed, keeping previous engine");
        }
    }
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("hemocheck=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hemocheck=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Install the Prometheus recorder and describe the service metrics
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "hemocheck_requests_total",
        "Total number of requests by endpoint"
    );
    metrics::describe_counter!(
        "hemocheck_classifications_total",
        "Classifications served by model and confidence bucket"
    );
    metrics::describe_histogram!(
        "hemocheck_inference_latency_us",
        metrics::Unit::Microseconds,
        "Classification latency in microseconds"
    );
    metrics::describe_counter!("hemocheck_errors_total", "Total number of errors by kind");

    info!("Metrics exporter initialized");
    Ok(handle)
}
