//! TSA Item Checker Server
//!
//! HTTP front for the item classifier:
//!
//! - `GET /` service info and route map
//! - `GET /health` liveness probe, never touches the completion API
//! - `POST /check-item` classify one item
//! - `GET /metrics` Prometheus exposition

pub mod cli;
pub mod config;
pub mod routes;
pub mod security;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;

/// Service name reported by the health probe
pub const SERVICE_NAME: &str = "tsa-item-checker";
