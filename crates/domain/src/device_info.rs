//! Device info: a read-only snapshot of the connected device.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// UTC timestamp a snapshot was captured at.
pub type Timestamp = DateTime<Utc>;

/// Descriptive snapshot of the device under test.
///
/// Owned by the backend that captured it; fields a platform cannot report
/// stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub platform: Platform,
    pub device: String,
    pub name: Option<String>,
    pub model: Option<String>,
    pub os_version: Option<String>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub density: Option<f64>,
    pub captured_at: Timestamp,
}

impl DeviceInfo {
    /// Start a snapshot for `device` on `platform`, captured now.
    #[must_use]
    pub fn new(platform: Platform, device: impl Into<String>) -> Self {
        Self {
            platform,
            device: device.into(),
            name: None,
            model: None,
            os_version: None,
            screen_width: None,
            screen_height: None,
            density: None,
            captured_at: Utc::now(),
        }
    }
}
