//! Common error types used across the workspace.
//!
//! Every layer returns [`DriverError`]. Adapters define their own typed
//! errors and convert into [`DriverError::Backend`] at the port boundary, so
//! the dispatcher never has to translate anything.

use std::path::PathBuf;

use crate::platform::Platform;

/// Boxed error produced by a concrete backend.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for configuration, selection, and every contract call.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The configuration path does not exist.
    #[error("configuration file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration file extension is neither `.yaml` nor `.json`.
    #[error("unsupported configuration file type {}, must be .json or .yaml", .path.display())]
    UnsupportedConfigFormat { path: PathBuf },

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be deserialized.
    #[error("invalid configuration file {}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: BackendError,
    },

    /// The configuration was loaded but breaks a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// No backend is registered for the device platform.
    #[error("unsupported device platform: '{0}'")]
    UnsupportedPlatform(Platform),

    /// A second backend tried to claim an already-registered platform.
    #[error("a backend is already registered for platform '{0}'")]
    DuplicateBackend(Platform),

    /// The element id is stale or was never issued by the backend.
    #[error("element not found: {element_id}")]
    ElementNotFound { element_id: String },

    /// The backend has no equivalent for this operation.
    #[error("{backend} backend does not support {operation}")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },

    /// `perform_action` was called with an action the backend does not know.
    #[error("unsupported action: {action}")]
    UnsupportedAction { action: String },

    /// The driver was already disposed.
    #[error("driver has been disposed")]
    Disposed,

    /// Any other backend failure, passed through unchanged.
    #[error("backend error")]
    Backend(#[source] BackendError),
}

/// Domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Neither `appId` nor `appFilename` is set.
    #[error("configuration must name an application (appId or appFilename)")]
    MissingApp,

    /// An element was built without an id.
    #[error("element id must not be empty")]
    EmptyElementId,
}
