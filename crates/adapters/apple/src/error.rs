//! Apple adapter error types.

use std::path::PathBuf;

use appdriver_app::ports::ProcessError;
use appdriver_domain::error::DriverError;

/// Errors specific to the Apple simulator backend.
#[derive(Debug, thiserror::Error)]
pub enum AppleError {
    /// Running `xcrun simctl` failed.
    #[error("simctl command failed")]
    Process(#[from] ProcessError),

    /// `simctl list devices --json` printed something we could not decode.
    #[error("failed to decode simulator list")]
    DeviceList(#[from] serde_json::Error),

    /// No simulator matches the configured device.
    #[error("no simulator matches device '{device}'")]
    DeviceNotFound { device: String },

    /// Copying a file into or out of the app container failed.
    #[error("file transfer failed for {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transfer source has no file name to copy under.
    #[error("not a file path: {}", .0.display())]
    NotAFile(PathBuf),

    /// A domain-level error (validation, ...).
    #[error("domain error")]
    Domain(#[source] DriverError),
}

impl AppleError {
    /// Convert into a [`DriverError`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> DriverError {
        match self {
            Self::Domain(err) => err,
            other => DriverError::Backend(Box::new(other)),
        }
    }
}

impl From<AppleError> for DriverError {
    fn from(err: AppleError) -> Self {
        err.into_domain()
    }
}
