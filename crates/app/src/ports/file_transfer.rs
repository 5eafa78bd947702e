//! File transfer port: moving files to and from the device.

use std::path::Path;

use appdriver_domain::error::DriverError;
use async_trait::async_trait;

/// File transfer between the host and the device.
#[async_trait]
pub trait FileTransfer: Send + Sync {
    /// Copy `remote_file` from the device into `local_directory`.
    async fn pull_file(
        &self,
        remote_file: &str,
        local_directory: &Path,
    ) -> Result<(), DriverError>;

    /// Copy `local_file` into `destination_directory` on the device.
    async fn push_file(
        &self,
        local_file: &Path,
        destination_directory: &str,
    ) -> Result<(), DriverError>;
}
