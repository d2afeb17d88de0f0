//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as CorsAny, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info, info_span, warn, Instrument};
use tsa_checker_core::{CheckRequest, CheckResult, Error};
use uuid::Uuid;

use crate::config::CorsConfig;
use crate::state::AppState;
use crate::SERVICE_NAME;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/check-item", post(check_item))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "TSA Item Checker API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "check_item": "/check-item",
            "health": "/health",
            "metrics": "/metrics",
        }
    }))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

/// Liveness only; never calls the completion API
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Classify one item
async fn check_item(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResult>, AppError> {
    metrics::counter!("tsa_checker_requests_total").increment(1);

    let request_id = Uuid::new_v4();
    let span = info_span!("check_item", %request_id);
    run_check(state, payload).instrument(span).await
}

async fn run_check(
    state: AppState,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResult>, AppError> {
    let Json(request) = payload.map_err(rejection_error)?;
    let item = request.validated_item()?;
    info!("Checking item: {}", item);

    let mut result = state
        .classifier
        .classify(item, request.description())
        .await?;

    if result.item != item {
        debug!(
            "Classifier {} returned item {:?}, restoring {:?}",
            state.classifier.name(),
            result.item,
            item
        );
        result.item = item.to_string();
    }

    info!(
        "Check complete: carry_on={} checked={}",
        result.carry_on_allowed, result.checked_baggage_allowed
    );
    Ok(Json(result))
}

/// Oversized bodies keep their 413, whatever the framing; anything else unreadable is a 400
fn rejection_error(rejection: JsonRejection) -> Error {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::payload_too_large(rejection.body_text())
    } else {
        Error::invalid_input(rejection.body_text())
    }
}

async fn fallback() -> Response {
    error_body(StatusCode::NOT_FOUND, "Not Found".to_string(), "not_found")
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(CorsAny)
        .allow_headers(CorsAny);

    if config.allowed_origins.is_empty() {
        return cors.allow_origin(CorsAny);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Turn a handler panic into a 500 with a body
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {}", detail);
    metrics::counter!("tsa_checker_errors_total", "kind" => "internal_error").increment(1);
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to check item: {}", detail),
        "internal_error",
    )
}

fn error_body(status: StatusCode, detail: String, kind: &'static str) -> Response {
    (status, Json(json!({ "detail": detail, "type": kind }))).into_response()
}

/// Error handling
#[derive(Debug)]
pub struct AppError(Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            warn!("Rejected check: {}", self.0);
        } else {
            error!("Check failed: {}", self.0);
        }
        metrics::counter!("tsa_checker_errors_total", "kind" => self.0.kind()).increment(1);

        error_body(status, self.0.to_string(), self.0.kind())
    }
}
