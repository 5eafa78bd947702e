//! # appdriver-adapter-windows
//!
//! Windows backend: manages packaged (MSIX/AppX) apps on the local machine
//! through PowerShell.
//!
//! The device is always the machine the driver runs on, so file transfer is
//! a local copy. Input synthesis and UI-tree access are not provided:
//! navigation, gestures, and element queries fail with
//! [`DriverError::Unsupported`].
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `appdriver-app` and `appdriver-domain`.

mod config;
mod error;
pub mod script;

pub use config::WindowsConfig;
pub use error::WindowsError;

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

const NAME: &str = "Windows";

/// Backend for packaged apps on the local Windows machine.
pub struct WindowsBackend {
    config: WindowsConfig,
    configuration: AutomationConfiguration,
    runner: Arc<dyn CommandRunner>,
}

impl WindowsBackend {
    #[must_use]
    pub fn new(
        config: WindowsConfig,
        configuration: AutomationConfiguration,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            config,
            configuration,
            runner,
        }
    }

    async fn powershell(&self, script: &str) -> Result<String, WindowsError> {
        let args = [
            "-NoProfile".to_string(),
            "-NonInteractive".to_string(),
            "-Command".to_string(),
            script.to_string(),
        ];
        tracing::debug!(script, "powershell");
        Ok(self
            .runner
            .run_checked(&self.config.powershell, &args)
            .await?)
    }

    fn app_id(&self) -> Result<&str, WindowsError> {
        required(&self.configuration.app_id)
    }
}

fn required(value: &str) -> Result<&str, WindowsError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(WindowsError::Domain(ValidationError::MissingApp.into()));
    }
    Ok(value)
}

impl std::fmt::Debug for WindowsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowsBackend")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn unsupported(operation: &'static str) -> DriverError {
    DriverError::Unsupported {
        backend: NAME,
        operation,
    }
}

/// Copy `source` into `directory`, keeping its file name.
async fn copy_into(source: &Path, directory: &Path) -> Result<PathBuf, WindowsError> {
    let file_name = source
        .file_name()
        .ok_or_else(|| WindowsError::NotAFile(source.to_path_buf()))?;
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|err| WindowsError::Io {
            path: directory.to_path_buf(),
            source: err,
        })?;
    let target = directory.join(file_name);
    tokio::fs::copy(source, &target)
        .await
        .map_err(|err| WindowsError::Io {
            path: source.to_path_buf(),
            source: err,
        })?;
    Ok(target)
}

/// Host name of the local machine, if the environment reports one.
fn computer_name() -> Option<String> {
    ["COMPUTERNAME", "HOSTNAME"]
        .into_iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
}

#[async_trait]
impl Navigation for WindowsBackend {
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
        self.powershell(&script::open(uri)).await?;
        Ok(())
    }
}

#[async_trait]
impl ElementQuery for WindowsBackend {
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
impl Gestures for WindowsBackend {
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
impl AppLifecycle for WindowsBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn install_app(&self) -> Result<(), DriverError> {
        let app_filename = required(&self.configuration.app_filename)?;
        self.powershell(&script::install(app_filename)).await?;
        tracing::info!(app_filename, "package installed");
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn remove_app(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        self.powershell(&script::remove(app_id)).await?;
        tracing::info!(app_id, "package removed");
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn launch_app(&self) -> Result<(), DriverError> {
        self.powershell(&script::launch(self.app_id()?)).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn stop_app(&self) -> Result<(), DriverError> {
        self.powershell(&script::stop(self.app_id()?)).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn clear_app_state(&self) -> Result<(), DriverError> {
        self.powershell(&script::reset(self.app_id()?)).await?;
        Ok(())
    }
}

#[async_trait]
impl FileTransfer for WindowsBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn pull_file(
        &self,
        remote_file: &str,
        local_directory: &Path,
    ) -> Result<(), DriverError> {
        copy_into(Path::new(remote_file), local_directory).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn push_file(
        &self,
        local_file: &Path,
        destination_directory: &str,
    ) -> Result<(), DriverError> {
        copy_into(local_file, Path::new(destination_directory)).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for WindowsBackend {
    fn name(&self) -> &str {
        NAME
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_device_info(&self) -> Result<DeviceInfo, DriverError> {
        let os_version = self.powershell(script::OS_VERSION).await?;
        let name = computer_name();
        let device = self
            .configuration
            .device()
            .map(ToString::to_string)
            .or_else(|| name.clone())
            .unwrap_or_else(|| "localhost".to_string());

        let mut info = DeviceInfo::new(self.configuration.device_platform, device);
        info.name = name;
        info.os_version = Some(os_version.trim().to_string()).filter(|v| !v.is_empty());
        Ok(info)
    }

    async fn dispose(&mut self) -> Result<(), DriverError> {
        tracing::debug!("windows backend disposed");
        Ok(())
    }
}
