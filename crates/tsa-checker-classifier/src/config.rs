//! Upstream completion API configuration

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tsa_checker_core::{Error, Result};

/// Environment variable holding the completion API key
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Settings for the outbound completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL; completions are posted to `{base_url}/chat/completions`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Cap on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Hard timeout for the whole call, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Permit plain-http and loopback base URLs (local development only)
    #[serde(default)]
    pub allow_insecure: bool,
}

impl UpstreamConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
            allow_insecure: false,
        }
    }
}

/// Read the API key from the process environment.
///
/// A missing or empty key is a configuration error; the service must not start
/// without one.
pub fn api_key_from_env() -> Result<SecretString> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
        _ => Err(Error::config(format!(
            "{API_KEY_ENV} environment variable is required"
        ))),
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "anthropic/claude-3.5-sonnet".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_ms() -> u64 {
    30_000
}
