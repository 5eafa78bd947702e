//! Outcome of a named action applied to an element.

use serde::{Deserialize, Serialize};

/// Result of `perform_action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformActionResult {
    pub success: bool,
    /// Backend-defined payload or diagnostic.
    pub message: Option<String>,
}

impl PerformActionResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
