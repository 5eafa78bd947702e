//! Navigation port: back, keys, text entry, deep links.

use appdriver_domain::error::DriverError;
use async_trait::async_trait;

/// Device-level navigation and input.
#[async_trait]
pub trait Navigation: Send + Sync {
    /// Trigger the platform's "back" navigation.
    ///
    /// Platforms without an equivalent return [`DriverError::Unsupported`].
    async fn back(&self) -> Result<(), DriverError>;

    /// Send text to the focused input.
    async fn input_text(&self, text: &str) -> Result<(), DriverError>;

    /// Send a single key event.
    async fn key_press(&self, key_code: u32) -> Result<(), DriverError>;

    /// Open a URI or deep link on the device.
    async fn open_uri(&self, uri: &str) -> Result<(), DriverError>;
}
