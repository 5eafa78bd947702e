//! Loading an [`AutomationConfiguration`] from a `.yaml` or `.json` file.
//!
//! Loading is all-or-nothing: the caller either gets a validated
//! configuration or an error, never a partially-filled record.

use std::path::Path;

use appdriver_domain::configuration::AutomationConfiguration;
use appdriver_domain::error::{BackendError, DriverError};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension, ignoring case.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("yaml") {
            Some(Self::Yaml)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// Deserialize `content` in this format.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_yaml` / `serde_json` error.
    pub fn parse(self, content: &str) -> Result<AutomationConfiguration, BackendError> {
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(Into::into),
            Self::Json => serde_json::from_str(content).map_err(Into::into),
        }
    }
}

/// Read, parse, and validate the configuration at `path`.
///
/// # Errors
///
/// - [`DriverError::ConfigNotFound`] when `path` does not exist
/// - [`DriverError::UnsupportedConfigFormat`] when the extension is neither
///   `.yaml` nor `.json`
/// - [`DriverError::ConfigRead`] / [`DriverError::InvalidConfig`] when the
///   file cannot be read or deserialized
/// - [`DriverError::Validation`] when the loaded record names no app
#[tracing::instrument]
pub fn load(path: &Path) -> Result<AutomationConfiguration, DriverError> {
    if !path.exists() {
        return Err(DriverError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| DriverError::UnsupportedConfigFormat {
            path: path.to_path_buf(),
        })?;

    let content = std::fs::read_to_string(path).map_err(|source| DriverError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config = format
        .parse(&content)
        .map_err(|source| DriverError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;

    tracing::debug!(
        device_platform = %config.device_platform,
        automation_platform = %config.automation_platform,
        "configuration loaded"
    );
    Ok(config)
}
