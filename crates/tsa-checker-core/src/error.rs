//! Error types for the TSA item checker

/// Result type alias using the checker's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a check can surface to a caller
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller sent something unusable
    #[error("{0}")]
    InvalidInput(String),

    /// The request body exceeds the configured size limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The completion API did not answer within the request timeout
    #[error("Request to LLM service timed out")]
    UpstreamTimeout,

    /// The completion API answered with a non-success status
    #[error("OpenRouter API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// DNS, connect, reset and other transport failures
    #[error("Network error: {0}")]
    Network(String),

    /// Anything else that went wrong while serving a check
    #[error("Unexpected error: {0}")]
    Internal(String),

    /// Startup configuration problems
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new payload too large error
    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self::PayloadTooLarge(msg.into())
    }

    /// Create a new upstream status error
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::PayloadTooLarge(_) => 413,
            Self::UpstreamTimeout => 504,
            Self::Upstream { .. } | Self::Network(_) | Self::Internal(_) | Self::Config(_) => 500,
        }
    }

    /// Stable machine-readable name, used in error bodies and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::UpstreamTimeout => "upstream_timeout",
            Self::Upstream { .. } => "upstream_error",
            Self::Network(_) => "network_error",
            Self::Internal(_) => "internal_error",
            Self::Config(_) => "config_error",
        }
    }

    /// True for failures caused by the caller rather than by this service
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
