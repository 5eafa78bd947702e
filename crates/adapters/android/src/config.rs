//! Android backend configuration.

use serde::Deserialize;

/// Where to find the Android platform tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
    /// Path to the `adb` executable, or a bare name resolved via `PATH`.
    pub adb: String,
    /// How long `long_press` holds, in milliseconds.
    pub long_press_ms: u32,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            adb: "adb".to_string(),
            long_press_ms: 1000,
        }
    }
}
