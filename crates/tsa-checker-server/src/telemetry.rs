//! Logging and metrics setup

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Initialize tracing/logging
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("tsa_checker=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tsa_checker=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Install the Prometheus recorder and return handle for rendering
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "tsa_checker_requests_total",
        "Total number of item checks received"
    );
    metrics::describe_counter!(
        "tsa_checker_errors_total",
        "Total number of failed item checks by error kind"
    );
    metrics::describe_counter!(
        "tsa_checker_reply_outcomes_total",
        "Model replies by how they were read (structured, no_json, malformed)"
    );
    metrics::describe_histogram!(
        "tsa_checker_upstream_latency_ms",
        metrics::Unit::Milliseconds,
        "Completion API round-trip latency in milliseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
