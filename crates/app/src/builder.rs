//! Fluent construction of [`AppDriver`]s.

use std::path::Path;
use std::sync::Arc;

use appdriver_domain::configuration::AutomationConfiguration;
use appdriver_domain::error::DriverError;
use appdriver_domain::platform::Platform;

use crate::config_file;
use crate::driver::AppDriver;
use crate::registry::BackendRegistry;

/// Accumulates an [`AutomationConfiguration`] and turns it into drivers.
///
/// Setters overwrite: the last write to a field wins. [`build`](Self::build)
/// snapshots the configuration, so the builder can keep being mutated and
/// reused without affecting drivers already built.
#[derive(Debug, Clone)]
pub struct AppDriverBuilder {
    registry: Arc<BackendRegistry>,
    configuration: AutomationConfiguration,
}

impl AppDriverBuilder {
    /// Start from the default configuration.
    #[must_use]
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self::from_configuration(registry, AutomationConfiguration::default())
    }

    #[must_use]
    pub fn from_configuration(
        registry: Arc<BackendRegistry>,
        configuration: AutomationConfiguration,
    ) -> Self {
        Self {
            registry,
            configuration,
        }
    }

    /// Replace the whole configuration with the one loaded from `path`.
    ///
    /// Every field is written, including the ones the file leaves out, so
    /// setters called earlier are reset. Call this first and apply setters
    /// afterwards to override file values.
    ///
    /// On error the builder is consumed and nothing is half-applied.
    ///
    /// # Errors
    ///
    /// See [`config_file::load`].
    pub fn with_config(mut self, path: impl AsRef<Path>) -> Result<Self, DriverError> {
        self.configuration = config_file::load(path.as_ref())?;
        Ok(self)
    }

    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.configuration.app_id = app_id.into();
        self
    }

    #[must_use]
    pub fn with_app_filename(mut self, app_filename: impl Into<String>) -> Self {
        self.configuration.app_filename = app_filename.into();
        self
    }

    #[must_use]
    pub fn using_device(mut self, device: impl Into<String>) -> Self {
        self.configuration.device = device.into();
        self
    }

    /// Select the device platform, and with it the backend.
    #[must_use]
    pub fn on_device_platform(mut self, platform: Platform) -> Self {
        self.configuration.device_platform = platform;
        self
    }

    #[must_use]
    pub fn with_automation_platform(mut self, platform: Platform) -> Self {
        self.configuration.automation_platform = platform;
        self
    }

    /// The configuration the next [`build`](Self::build) will use.
    #[must_use]
    pub fn configuration(&self) -> &AutomationConfiguration {
        &self.configuration
    }

    /// Build a new driver from a copy of the current configuration.
    ///
    /// Every call returns an independent driver with its own backend.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnsupportedPlatform`] when the device platform
    /// has no registered backend, or the backend factory's error.
    pub fn build(&self) -> Result<AppDriver, DriverError> {
        AppDriver::new(&self.registry, self.configuration.clone())
    }
}
