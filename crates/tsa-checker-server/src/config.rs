//! Server configuration
//!
//! Precedence: CLI flags and their environment variables, then the YAML file,
//! then built-in defaults. The API key never lives in the YAML file.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tsa_checker_classifier::{api_key_from_env, UpstreamConfig};

use crate::cli::Cli;
use crate::security::validate_upstream_url;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsConfig,

    /// Completion API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = Self::from_file(&cli.config)?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file, or defaults when it does not exist
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(listen) = &cli.listen {
            self.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            self.port = port;
        }

        if let Some(base_url) = &cli.base_url {
            self.upstream.base_url = base_url.clone();
        }

        if let Some(model) = &cli.model {
            self.upstream.model = model.clone();
        }
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_upstream_url(&self.upstream.base_url, self.upstream.allow_insecure)?;

        if self.upstream.timeout_ms == 0 {
            anyhow::bail!("upstream.timeout_ms must be greater than zero");
        }
        if self.upstream.max_tokens == 0 {
            anyhow::bail!("upstream.max_tokens must be greater than zero");
        }
        if self.upstream.model.trim().is_empty() {
            anyhow::bail!("upstream.model must not be empty");
        }

        self.socket_addr()?;
        Ok(())
    }

    /// Address to bind
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.listen, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {}:{}: {}", self.listen, self.port, e))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            cors: CorsConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

/// Cross-origin configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// The completion API key, from `--api-key` / `OPENROUTER_API_KEY`.
///
/// Missing or blank is fatal: the server refuses to start.
pub fn resolve_api_key(cli: &Cli) -> tsa_checker_core::Result<SecretString> {
    match &cli.api_key {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::from(key.clone())),
        _ => api_key_from_env(),
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}
