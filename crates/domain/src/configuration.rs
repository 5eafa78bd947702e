//! Automation configuration: what to drive and where.

use serde::{Deserialize, Serialize};

use crate::error::{DriverError, ValidationError};
use crate::platform::Platform;

/// The record a driver is built from.
///
/// Serialized with camelCase keys (`devicePlatform`, `appId`, …). Every key
/// is optional; missing keys take their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutomationConfiguration {
    /// Platform of the device under test; selects the backend.
    pub device_platform: Platform,
    /// Automation protocol to speak; may differ from `device_platform`.
    pub automation_platform: Platform,
    /// Device identifier. Empty means the default device.
    pub device: String,
    /// Package or bundle identifier.
    pub app_id: String,
    /// Path to an installable artifact.
    pub app_filename: String,
}

impl AutomationConfiguration {
    /// Check the invariants a configuration file must satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Validation`] when neither `app_id` nor
    /// `app_filename` is set.
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.app_id.trim().is_empty() && self.app_filename.trim().is_empty() {
            return Err(ValidationError::MissingApp.into());
        }
        Ok(())
    }

    /// The device identifier, or `None` when the default device is meant.
    #[must_use]
    pub fn device(&self) -> Option<&str> {
        let device = self.device.trim();
        (!device.is_empty()).then_some(device)
    }
}
