//! # appdriver
//!
//! Composition root: registers every platform backend and exposes the
//! driver through a command line.
//!
//! ## Responsibilities
//! - Load host settings (`appdriver.toml` + env overrides)
//! - Build the default [`BackendRegistry`](appdriver_app::registry::BackendRegistry)
//!   mapping each platform to its adapter
//! - Hand out [`AppDriverBuilder`]s wired to that registry
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No automation logic belongs here.

pub mod cli;
pub mod config;
pub mod platforms;

use std::sync::Arc;

use appdriver_app::builder::AppDriverBuilder;
use appdriver_app::ports::CommandRunner;
use appdriver_app::process::SystemCommandRunner;
use appdriver_domain::error::DriverError;

use crate::config::Config;

/// A builder over the default registry, running tools on this host.
///
/// # Errors
///
/// Returns [`DriverError::DuplicateBackend`] if the registry is miswired.
pub fn builder(config: &Config) -> Result<AppDriverBuilder, DriverError> {
    builder_with_runner(config, Arc::new(SystemCommandRunner))
}

/// A builder over the default registry, running tools through `runner`.
///
/// # Errors
///
/// Returns [`DriverError::DuplicateBackend`] if the registry is miswired.
pub fn builder_with_runner(
    config: &Config,
    runner: Arc<dyn CommandRunner>,
) -> Result<AppDriverBuilder, DriverError> {
    let registry = platforms::default_registry(config, runner)?;
    Ok(AppDriverBuilder::new(Arc::new(registry)))
}
