//! Apple backend configuration.

use serde::Deserialize;

/// Where to find the Xcode command line tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppleConfig {
    /// Path to `xcrun`, or a bare name resolved via `PATH`.
    pub xcrun: String,
}

impl Default for AppleConfig {
    fn default() -> Self {
        Self {
            xcrun: "xcrun".to_string(),
        }
    }
}
