//! Android adapter error types.

use appdriver_app::ports::ProcessError;
use appdriver_domain::error::DriverError;

/// Errors specific to the Android backend.
#[derive(Debug, thiserror::Error)]
pub enum AndroidError {
    /// Running `adb` failed.
    #[error("adb command failed")]
    Process(#[from] ProcessError),

    /// A `find_elements` expression is not a valid regular expression.
    #[error("invalid element pattern")]
    InvalidPattern(#[source] regex::Error),

    /// The uiautomator dump could not be turned into an element tree.
    #[error("malformed uiautomator dump: {0}")]
    MalformedDump(&'static str),

    /// `adb` printed something we could not interpret.
    #[error("unexpected output from `{command}`: {output}")]
    UnexpectedOutput {
        command: &'static str,
        output: String,
    },

    /// A domain-level error (element not found, unsupported action, ...).
    #[error("domain error")]
    Domain(#[source] DriverError),
}

impl AndroidError {
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

impl From<AndroidError> for DriverError {
    fn from(err: AndroidError) -> Self {
        err.into_domain()
    }
}
