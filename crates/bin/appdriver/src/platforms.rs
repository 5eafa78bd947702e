//! Platform → backend wiring.
//!
//! Adding a [`Platform`] variant means adding its registration here in the
//! same change; anything left out fails at build time with
//! `UnsupportedPlatform`.

use std::sync::Arc;

use appdriver_adapter_android::AndroidBackend;
use appdriver_adapter_apple::AppleBackend;
use appdriver_adapter_windows::WindowsBackend;
use appdriver_app::ports::{Backend, CommandRunner};
use appdriver_app::registry::BackendRegistry;
use appdriver_domain::error::DriverError;
use appdriver_domain::platform::Platform;

use crate::config::Config;

/// Registry with every backend this build ships.
///
/// | Platform | Backend |
/// |----------|---------|
/// | `Android` | [`AndroidBackend`] |
/// | `Ios`, `Tvos`, `Maccatalyst` | [`AppleBackend`] |
/// | `Winappsdk` | [`WindowsBackend`] |
///
/// `Maui` and `Macos` have no backend.
///
/// # Errors
///
/// Returns [`DriverError::DuplicateBackend`] if two registrations overlap.
pub fn default_registry(
    config: &Config,
    runner: Arc<dyn CommandRunner>,
) -> Result<BackendRegistry, DriverError> {
    let android = config.android.clone();
    let apple = config.apple.clone();
    let windows = config.windows.clone();
    let (android_runner, apple_runner, windows_runner) =
        (Arc::clone(&runner), Arc::clone(&runner), runner);

    BackendRegistry::new()
        .with(&[Platform::Android], move |configuration| {
            let backend = AndroidBackend::new(
                android.clone(),
                configuration.clone(),
                Arc::clone(&android_runner),
            )?;
            Ok(Box::new(backend) as Box<dyn Backend>)
        })?
        .with(
            &[Platform::Ios, Platform::Tvos, Platform::Maccatalyst],
            move |configuration| {
                let backend = AppleBackend::new(
                    apple.clone(),
                    configuration.clone(),
                    Arc::clone(&apple_runner),
                );
                Ok(Box::new(backend) as Box<dyn Backend>)
            },
        )?
        .with(&[Platform::Winappsdk], move |configuration| {
            let backend = WindowsBackend::new(
                windows.clone(),
                configuration.clone(),
                Arc::clone(&windows_runner),
            );
            Ok(Box::new(backend) as Box<dyn Backend>)
        })
}
