//! # appdriver-adapter-apple
//!
//! Apple backend: drives iOS, tvOS, and Mac Catalyst simulators through
//! `xcrun simctl`.
//!
//! `simctl` manages app lifecycle, deep links, and the app's data container,
//! but has no input synthesis or accessibility tree. Navigation, gestures,
//! and element queries therefore fail with [`DriverError::Unsupported`].
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `appdriver-app` and `appdriver-domain`.

mod config;
mod error;
pub mod simulator;

pub use config::AppleConfig;
pub use error::AppleError;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use appdriver_app::ports::{
    AppLifecycle, Backend, CommandRunner, ElementQuery, FileTransfer, Gestures, Navigation,
};
use appdriver_domain::action::PerformActionResult;
use appdriver_domain::configuration::AutomationConfiguration;
use appdriver_domain::device_info::DeviceInfo;
use appdriver_domain::element::Element;
use appdriver_domain::error::{DriverError, ValidationError};
use appdriver_domain::geometry::Point;

use crate::simulator::DeviceList;

const NAME: &str = "iOS";
const BOOTED: &str = "booted";

/// Backend for Apple simulators.
pub struct AppleBackend {
    config: AppleConfig,
    configuration: AutomationConfiguration,
    runner: Arc<dyn CommandRunner>,
}

impl AppleBackend {
    #[must_use]
    pub fn new(
        config: AppleConfig,
        configuration: AutomationConfiguration,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            config,
            configuration,
            runner,
        }
    }

    /// Target simulator: the configured UDID or `booted`.
    fn device(&self) -> &str {
        self.configuration.device().unwrap_or(BOOTED)
    }

    fn app_id(&self) -> Result<&str, AppleError> {
        let app_id = self.configuration.app_id.trim();
        if app_id.is_empty() {
            return Err(AppleError::Domain(ValidationError::MissingApp.into()));
        }
        Ok(app_id)
    }

    fn app_filename(&self) -> Option<&str> {
        let app_filename = self.configuration.app_filename.trim();
        (!app_filename.is_empty()).then_some(app_filename)
    }

    async fn simctl(&self, args: &[&str]) -> Result<String, AppleError> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push("simctl".to_string());
        full.extend(args.iter().map(ToString::to_string));
        tracing::debug!(?args, "simctl");
        Ok(self.runner.run_checked(&self.config.xcrun, &full).await?)
    }

    async fn install(&self) -> Result<(), AppleError> {
        let app_filename = self
            .app_filename()
            .ok_or_else(|| AppleError::Domain(ValidationError::MissingApp.into()))?;
        self.simctl(&["install", self.device(), app_filename]).await?;
        tracing::info!(app_filename, device = self.device(), "app installed");
        Ok(())
    }

    /// Root of the app's data container on the simulator's host filesystem.
    async fn data_container(&self) -> Result<PathBuf, AppleError> {
        let output = self
            .simctl(&["get_app_container", self.device(), self.app_id()?, "data"])
            .await?;
        Ok(PathBuf::from(output.trim()))
    }
}

impl std::fmt::Debug for AppleBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppleBackend")
            .field("config", &self.config)
            .field("device", &self.device())
            .finish_non_exhaustive()
    }
}

fn unsupported(operation: &'static str) -> DriverError {
    DriverError::Unsupported {
        backend: NAME,
        operation,
    }
}

/// Resolve `path` inside `root`, treating absolute paths as root-relative.
fn within(root: &Path, path: &str) -> PathBuf {
    root.join(path.trim_start_matches('/'))
}

/// Copy `source` into `directory`, keeping its file name.
async fn copy_into(source: &Path, directory: &Path) -> Result<PathBuf, AppleError> {
    let file_name = source
        .file_name()
        .ok_or_else(|| AppleError::NotAFile(source.to_path_buf()))?;
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|source| AppleError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
    let target = directory.join(file_name);
    tokio::fs::copy(source, &target)
        .await
        .map_err(|err| AppleError::Io {
            path: source.to_path_buf(),
            source: err,
        })?;
    Ok(target)
}

#[async_trait]
impl Navigation for AppleBackend {
    async fn back(&self) -> Result<(), DriverError> {
        Err(unsupported("back"))
    }

    async fn input_text(&self, _text: &str) -> Result<(), DriverError> {
        Err(unsupported("input_text"))
    }

    async fn key_press(&self, _key_code: u32) -> Result<(), DriverError> {
        Err(unsupported("key_press"))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn open_uri(&self, uri: &str) -> Result<(), DriverError> {
        self.simctl(&["openurl", self.device(), uri]).await?;
        Ok(())
    }
}

#[async_trait]
impl ElementQuery for AppleBackend {
    async fn find_elements(
        &self,
        _property_name: &str,
        _pattern: &str,
        _is_expression: bool,
        _ancestor_id: Option<&str>,
    ) -> Result<Vec<Element>, DriverError> {
        Err(unsupported("find_elements"))
    }

    async fn get_elements(&self) -> Result<Vec<Element>, DriverError> {
        Err(unsupported("get_elements"))
    }

    async fn get_property(
        &self,
        _element_id: &str,
        _property_name: &str,
    ) -> Result<String, DriverError> {
        Err(unsupported("get_property"))
    }

    async fn perform_action(
        &self,
        _action: &str,
        _element_id: &str,
        _arguments: &[String],
    ) -> Result<PerformActionResult, DriverError> {
        Err(unsupported("perform_action"))
    }
}

#[async_trait]
impl Gestures for AppleBackend {
    async fn tap(&self, _x: i32, _y: i32) -> Result<(), DriverError> {
        Err(unsupported("tap"))
    }

    async fn tap_element(&self, _element: &Element) -> Result<(), DriverError> {
        Err(unsupported("tap_element"))
    }

    async fn long_press(&self, _x: i32, _y: i32) -> Result<(), DriverError> {
        Err(unsupported("long_press"))
    }

    async fn swipe(&self, _start: Point, _end: Point) -> Result<(), DriverError> {
        Err(unsupported("swipe"))
    }
}

#[async_trait]
impl AppLifecycle for AppleBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn install_app(&self) -> Result<(), DriverError> {
        Ok(self.install().await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn remove_app(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        self.simctl(&["uninstall", self.device(), app_id]).await?;
        tracing::info!(app_id, "app removed");
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn launch_app(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        self.simctl(&["launch", self.device(), app_id]).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn stop_app(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        self.simctl(&["terminate", self.device(), app_id]).await?;
        Ok(())
    }

    /// Terminate, uninstall, and reinstall when an artifact is configured.
    #[tracing::instrument(level = "debug", skip(self))]
    async fn clear_app_state(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        if let Err(err) = self.simctl(&["terminate", self.device(), app_id]).await {
            tracing::debug!(error = %err, "app was not running");
        }
        self.simctl(&["uninstall", self.device(), app_id]).await?;
        if self.app_filename().is_some() {
            self.install().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl FileTransfer for AppleBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn pull_file(
        &self,
        remote_file: &str,
        local_directory: &Path,
    ) -> Result<(), DriverError> {
        let container = self.data_container().await?;
        let target = copy_into(&within(&container, remote_file), local_directory).await?;
        tracing::debug!(target = %target.display(), "file pulled");
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn push_file(
        &self,
        local_file: &Path,
        destination_directory: &str,
    ) -> Result<(), DriverError> {
        let container = self.data_container().await?;
        let target = copy_into(local_file, &within(&container, destination_directory)).await?;
        tracing::debug!(target = %target.display(), "file pushed");
        Ok(())
    }
}

#[async_trait]
impl Backend for AppleBackend {
    fn name(&self) -> &str {
        NAME
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_device_info(&self) -> Result<DeviceInfo, DriverError> {
        let output = self.simctl(&["list", "devices", "--json"]).await?;
        let list = DeviceList::parse(&output)?;
        let found = list
            .find(self.configuration.device())
            .ok_or_else(|| AppleError::DeviceNotFound {
                device: self.device().to_string(),
            })?;

        let mut info = DeviceInfo::new(
            self.configuration.device_platform,
            found.simulator.udid.clone(),
        );
        info.name = Some(found.simulator.name.clone());
        info.model = found.model();
        info.os_version = Some(found.os_version());
        Ok(info)
    }

    async fn dispose(&mut self) -> Result<(), DriverError> {
        tracing::debug!(device = self.device(), "apple backend disposed");
        Ok(())
    }
}
