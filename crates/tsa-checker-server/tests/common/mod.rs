//! Shared helpers for server tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tsa_checker_classifier::ItemClassifier;
use tsa_checker_core::{CheckResult, Error, Result};
use tsa_checker_server::{create_router, AppState, ServerConfig};

/// What the mock answers with
pub enum MockBehavior {
    Answer(CheckResult),
    Fail(fn() -> Error),
    Panic,
}

/// A configurable mock classifier for testing
pub struct MockClassifier {
    behavior: MockBehavior,
    simulated_latency: Option<Duration>,
    call_count: AtomicU32,
    last_description: std::sync::Mutex<Option<String>>,
}

impl MockClassifier {
    /// Mock that always returns `result`
    pub fn answering(result: CheckResult) -> Self {
        Self::with_behavior(MockBehavior::Answer(result))
    }

    /// Mock that always fails with the error built by `make_error`
    pub fn failing(make_error: fn() -> Error) -> Self {
        Self::with_behavior(MockBehavior::Fail(make_error))
    }

    /// Mock that panics when called
    pub fn panicking() -> Self {
        Self::with_behavior(MockBehavior::Panic)
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            simulated_latency: None,
            call_count: AtomicU32::new(0),
            last_description: std::sync::Mutex::new(None),
        }
    }

    /// Set simulated latency for this classifier
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = Some(latency);
        self
    }

    /// Get the number of times classify was called
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Description passed on the most recent call
    pub fn last_description(&self) -> Option<String> {
        self.last_description.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemClassifier for MockClassifier {
    async fn classify(&self, _item: &str, description: Option<&str>) -> Result<CheckResult> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_description.lock().unwrap() = description.map(str::to_string);

        if let Some(latency) = self.simulated_latency {
            tokio::time::sleep(latency).await;
        }

        match &self.behavior {
            MockBehavior::Answer(result) => Ok(result.clone()),
            MockBehavior::Fail(make_error) => Err(make_error()),
            MockBehavior::Panic => panic!("classifier exploded"),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A plausible answer whose `item` deliberately differs from any request
pub fn sample_result() -> CheckResult {
    CheckResult {
        item: "model-substituted item".to_string(),
        carry_on_allowed: true,
        checked_baggage_allowed: true,
        description: "Allowed in both.".to_string(),
        restrictions: Some("None".to_string()),
        additional_notes: None,
    }
}

/// Router around a classifier with default configuration
pub fn router_with(classifier: Arc<dyn ItemClassifier>) -> Router {
    create_router(AppState::new(ServerConfig::default(), classifier))
}

/// Send one request and return status plus JSON body (Null when not JSON)
pub async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    send_request(router, builder.body(body).unwrap()).await
}

/// Send a prepared request and return status plus JSON body (Null when not JSON)
pub async fn send_request(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// POST a JSON body to /check-item
pub async fn post_check(router: Router, body: &str) -> (StatusCode, Value) {
    send(router, Method::POST, "/check-item", Some(body)).await
}
