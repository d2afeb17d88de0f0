//! TSA Item Checker Classifier
//!
//! Turns one (item, description) pair into one [`CheckResult`] by asking a
//! chat-completion API and reading whatever text comes back.
//!
//! - [`prompt`] builds the instruction sent to the model
//! - [`reply`] digs a JSON verdict out of free text, failing closed
//! - [`OpenRouterClassifier`] performs the single outbound call
//!
//! [`CheckResult`]: tsa_checker_core::CheckResult

pub mod classifier;
pub mod config;
pub mod openrouter;
pub mod prompt;
pub mod reply;

pub use classifier::ItemClassifier;
pub use config::{api_key_from_env, UpstreamConfig};
pub use openrouter::OpenRouterClassifier;
pub use reply::{interpret_reply, Interpretation, ReplyOutcome};

