//! OpenRouter chat-completions classifier
//!
//! One item, one prompt, one POST. No retries: a failed call is reported as a
//! failed check.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info};
use tsa_checker_core::{CheckResult, Error, Result};

use crate::classifier::ItemClassifier;
use crate::config::UpstreamConfig;
use crate::prompt::build_prompt;
use crate::reply::{interpret_reply, Interpretation};

/// Classifier backed by an OpenAI-compatible chat-completions endpoint
#[derive(Debug)]
pub struct OpenRouterClassifier {
    api_key: SecretString,
    config: UpstreamConfig,
    http_client: reqwest::Client,
}

impl OpenRouterClassifier {
    /// Create a classifier with an explicit key
    pub fn new(api_key: SecretString, config: UpstreamConfig) -> Result<Self> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(Error::config("completion API key must not be empty"));
        }

        // Idle connections are not pooled, so every call opens and releases its own.
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            config,
            http_client,
        })
    }

    /// Send the prompt and return the model's reply text
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let start = Instant::now();
        let outcome = self.post_completion(&request).await;
        let latency = start.elapsed();
        metrics::histogram!("tsa_checker_upstream_latency_ms").record(latency.as_secs_f64() * 1000.0);
        debug!("Completion API call finished in {:?}", latency);
        let body = outcome?;

        let envelope: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::internal(format!("malformed completion response: {}", e)))?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::internal("completion response has no message content"))
    }

    /// POST the request and read the whole body, within the client timeout
    async fn post_completion(&self, request: &ChatCompletionRequest<'_>) -> Result<String> {
        let response = self
            .http_client
            .post(self.config.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            error!("Completion API returned {}: {}", status, body);
            return Err(Error::upstream(status.as_u16(), body));
        }
        Ok(body)
    }
}

#[async_trait]
impl ItemClassifier for OpenRouterClassifier {
    async fn classify(&self, item: &str, description: Option<&str>) -> Result<CheckResult> {
        let prompt = build_prompt(item, description);
        info!("Classifying item with model {}", self.config.model);

        let reply = self.complete(&prompt).await?;
        let Interpretation { result, outcome } = interpret_reply(item, &reply);

        metrics::counter!("tsa_checker_reply_outcomes_total", "outcome" => outcome.as_str())
            .increment(1);
        debug!("Reply outcome: {}", outcome.as_str());

        Ok(result)
    }

    fn name(&self) -> &str {
        "openrouter"
    }
}

/// Classify a reqwest failure
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        error!("Completion API call timed out");
        Error::UpstreamTimeout
    } else if err.is_decode() {
        Error::internal(error_chain(&err))
    } else {
        error!("Completion API transport failure: {}", error_chain(&err));
        Error::network(error_chain(&err))
    }
}

/// Render an error with its sources, e.g. "error sending request: connection refused"
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let err = OpenRouterClassifier::new(SecretString::from("  ".to_string()), UpstreamConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_request_payload_shape() {
        let request = ChatCompletionRequest {
            model: "anthropic/claude-3.5-sonnet",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.1,
            max_tokens: 1000,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "anthropic/claude-3.5-sonnet");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["max_tokens"], 1000);
        assert!((value["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_with_extra_fields() {
        let body = r#"{"id": "gen-1", "choices": [{"index": 0, "message": {"role": "assistant", "content": "{}"}, "finish_reason": "stop"}], "usage": {"total_tokens": 12}}"#;
        let envelope: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.choices[0].message.content.as_deref(), Some("{}"));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let classifier = OpenRouterClassifier::new(
            SecretString::from("sk-or-very-secret".to_string()),
            UpstreamConfig::default(),
        )
        .unwrap();
        assert!(!format!("{:?}", classifier).contains("sk-or-very-secret"));
        assert_eq!(classifier.name(), "openrouter");
    }
}
