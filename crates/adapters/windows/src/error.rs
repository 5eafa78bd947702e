//! Windows adapter error types.

use std::path::PathBuf;

use appdriver_app::ports::ProcessError;
use appdriver_domain::error::DriverError;

/// Errors specific to the Windows backend.
#[derive(Debug, thiserror::Error)]
pub enum WindowsError {
    /// Running PowerShell failed.
    #[error("powershell command failed")]
    Process(#[from] ProcessError),

    /// A local file copy failed.
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

impl WindowsError {
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

impl From<WindowsError> for DriverError {
    fn from(err: WindowsError) -> Self {
        err.into_domain()
    }
}
