//! TSA Item Checker Server
//!
//! Answers whether an item may travel in carry-on and/or checked luggage by
//! asking a chat-completion model and normalizing its reply.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use tsa_checker_classifier::OpenRouterClassifier;
use tsa_checker_server::cli::Cli;
use tsa_checker_server::config::{resolve_api_key, ServerConfig};
use tsa_checker_server::telemetry::{init_metrics, init_tracing};
use tsa_checker_server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; real environment variables win.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Starting TSA Item Checker v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::load(&cli)?;
    info!("Configuration loaded successfully");
    info!("Upstream: {}", config.upstream.base_url);
    info!("Model: {}", config.upstream.model);

    // Fatal without a key: the service must not come up only to fail every check.
    let api_key = resolve_api_key(&cli)?;
    let classifier = OpenRouterClassifier::new(api_key, config.upstream.clone())?;

    let metrics_handle = init_metrics()?;

    let addr = config.socket_addr()?;
    let state = AppState::new(config, Arc::new(classifier)).with_metrics(metrics_handle);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
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
