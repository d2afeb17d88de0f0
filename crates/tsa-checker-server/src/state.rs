//! Shared, read-only application state

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tsa_checker_classifier::ItemClassifier;

use crate::config::ServerConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Classifier answering item checks
    pub classifier: Arc<dyn ItemClassifier>,

    /// Prometheus handle for rendering, when a recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state around a classifier
    pub fn new(config: ServerConfig, classifier: Arc<dyn ItemClassifier>) -> Self {
        Self {
            config: Arc::new(config),
            classifier,
            metrics_handle: None,
        }
    }

    /// Attach the Prometheus handle used by `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
