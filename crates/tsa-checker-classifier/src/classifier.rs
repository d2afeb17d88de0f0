//! Classifier trait

use async_trait::async_trait;
use tsa_checker_core::{CheckResult, Result};

/// Anything that can decide how an item may travel
#[async_trait]
pub trait ItemClassifier: Send + Sync {
    /// Classify an already-trimmed item.
    ///
    /// The returned result's `item` must equal the `item` argument.
    async fn classify(&self, item: &str, description: Option<&str>) -> Result<CheckResult>;

    /// Get the classifier name
    fn name(&self) -> &str;
}
