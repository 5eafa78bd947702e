//! App lifecycle port: install, launch, stop, remove, reset.

use appdriver_domain::error::DriverError;
use async_trait::async_trait;

/// Lifecycle of the configured application on the device.
///
/// The application is the one named by the configuration the backend was
/// built from (`app_id` / `app_filename`).
#[async_trait]
pub trait AppLifecycle: Send + Sync {
    async fn install_app(&self) -> Result<(), DriverError>;

    async fn remove_app(&self) -> Result<(), DriverError>;

    async fn launch_app(&self) -> Result<(), DriverError>;

    async fn stop_app(&self) -> Result<(), DriverError>;

    /// Reset the application to a fresh-install-like state.
    async fn clear_app_state(&self) -> Result<(), DriverError>;
}
