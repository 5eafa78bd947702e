//! Backend port: the full capability contract.

use appdriver_domain::device_info::DeviceInfo;
use appdriver_domain::error::DriverError;
use async_trait::async_trait;

use super::{AppLifecycle, ElementQuery, FileTransfer, Gestures, Navigation};

/// A concrete automation backend for one device platform.
///
/// Implementations live in adapter crates (e.g. `adapter_android`). The
/// dispatcher holds exactly one boxed backend and forwards every call to it.
#[async_trait]
pub trait Backend: Navigation + ElementQuery + Gestures + AppLifecycle + FileTransfer {
    /// Backend-reported driver name (e.g. `"Android"`).
    fn name(&self) -> &str;

    /// Snapshot of the connected device.
    async fn get_device_info(&self) -> Result<DeviceInfo, DriverError>;

    /// Release any device or session resources.
    ///
    /// Must be idempotent: a second call is a no-op returning `Ok(())`.
    async fn dispose(&mut self) -> Result<(), DriverError>;
}
