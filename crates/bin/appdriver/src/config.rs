//! CLI settings: TOML file with environment variable overrides.
//!
//! Looks for `appdriver.toml` in the working directory unless another path
//! is given. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.
//!
//! These settings describe the host (where the platform tools live, how to
//! log). What to drive comes from the separate YAML/JSON automation
//! configuration.

use std::path::Path;

use appdriver_adapter_android::AndroidConfig;
use appdriver_adapter_apple::AppleConfig;
use appdriver_adapter_windows::WindowsConfig;
use serde::Deserialize;

/// Default settings file name.
pub const DEFAULT_PATH: &str = "appdriver.toml";

/// Top-level settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    /// Android platform tools.
    pub android: AndroidConfig,
    /// Xcode command line tools.
    pub apple: AppleConfig,
    /// PowerShell.
    pub windows: WindowsConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "appdriver=info,appdriver_app=info,warn".to_string(),
        }
    }
}

impl Config {
    /// Load settings from `path` (if present) then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if the
    /// resulting settings are invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("APPDRIVER_ADB") {
            self.android.adb = val;
        }
        if let Ok(val) = std::env::var("APPDRIVER_XCRUN") {
            self.apple.xcrun = val;
        }
        if let Ok(val) = std::env::var("APPDRIVER_POWERSHELL") {
            self.windows.powershell = val;
        }
        if let Ok(val) = std::env::var("APPDRIVER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let tools = [
            ("android.adb", &self.android.adb),
            ("apple.xcrun", &self.apple.xcrun),
            ("windows.powershell", &self.windows.powershell),
        ];
        if let Some((key, _)) = tools.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Validation(format!("{key} must not be empty")));
        }
        if self.android.long_press_ms == 0 {
            return Err(ConfigError::Validation(
                "android.long_press_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse settings file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read settings file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid settings: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.android.adb, "adb");
        assert_eq!(config.apple.xcrun, "xcrun");
        assert_eq!(config.windows.powershell, "powershell");
        assert!(config.logging.filter.contains("appdriver=info"));
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.android.long_press_ms, 1000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [logging]
            filter = 'debug'

            [android]
            adb = '/opt/android-sdk/platform-tools/adb'
            long_press_ms = 1500

            [apple]
            xcrun = '/usr/bin/xcrun'

            [windows]
            powershell = 'pwsh'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.android.adb, "/opt/android-sdk/platform-tools/adb");
        assert_eq!(config.android.long_press_ms, 1500);
        assert_eq!(config.apple.xcrun, "/usr/bin/xcrun");
        assert_eq!(config.windows.powershell, "pwsh");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml")).unwrap();
        assert_eq!(config.android.adb, "adb");
    }

    #[test]
    fn should_report_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appdriver.toml");
        std::fs::write(&path, "[android\nadb = 1").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn should_reject_empty_tool_path() {
        let mut config = Config::default();
        config.apple.xcrun = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid settings: apple.xcrun must not be empty"
        );
    }

    #[test]
    fn should_reject_zero_long_press() {
        let mut config = Config::default();
        config.android.long_press_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }
}
