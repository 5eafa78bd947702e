//! Driver dispatcher: one handle over whichever backend the configuration
//! selects.
//!
//! [`AppDriver`] picks its backend once, at construction, through the
//! [`BackendRegistry`], and from then on every contract call is a plain
//! delegation. It implements [`Backend`] itself so callers can be generic over
//! "anything that drives a device".

use std::path::Path;

use appdriver_domain::action::PerformActionResult;
use appdriver_domain::configuration::AutomationConfiguration;
use appdriver_domain::device_info::DeviceInfo;
use appdriver_domain::element::Element;
use appdriver_domain::error::DriverError;
use appdriver_domain::geometry::Point;
use appdriver_domain::id::SessionId;
use async_trait::async_trait;

use crate::ports::{AppLifecycle, Backend, ElementQuery, FileTransfer, Gestures, Navigation};
use crate::registry::BackendRegistry;

/// The platform-agnostic automation driver.
///
/// Owns exactly one backend until [`dispose`](Backend::dispose) is called.
/// After that every operation except [`name`](Backend::name) fails with
/// [`DriverError::Disposed`].
pub struct AppDriver {
    session_id: SessionId,
    name: String,
    configuration: AutomationConfiguration,
    backend: Option<Box<dyn Backend>>,
}

impl AppDriver {
    /// Select and construct the backend for `configuration`.
    ///
    /// The configuration is taken by value: nothing that happens to the
    /// caller's copy afterwards reaches this driver.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnsupportedPlatform`] when no backend is
    /// registered for `configuration.device_platform`, or the backend
    /// factory's own error.
    pub fn new(
        registry: &BackendRegistry,
        configuration: AutomationConfiguration,
    ) -> Result<Self, DriverError> {
        let session_id = SessionId::new();
        let backend = registry.create(&configuration)?;
        let name = backend.name().to_string();
        tracing::info!(
            %session_id,
            backend = %name,
            device_platform = %configuration.device_platform,
            device = configuration.device().unwrap_or("default"),
            "driver created"
        );
        Ok(Self {
            session_id,
            name,
            configuration,
            backend: Some(backend),
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The configuration snapshot this driver was built from.
    #[must_use]
    pub fn configuration(&self) -> &AutomationConfiguration {
        &self.configuration
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.backend.is_none()
    }

    fn backend(&self) -> Result<&dyn Backend, DriverError> {
        self.backend.as_deref().ok_or(DriverError::Disposed)
    }
}

impl std::fmt::Debug for AppDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppDriver")
            .field("session_id", &self.session_id)
            .field("name", &self.name)
            .field("configuration", &self.configuration)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl Drop for AppDriver {
    fn drop(&mut self) {
        if self.backend.is_some() {
            tracing::warn!(
                session_id = %self.session_id,
                backend = %self.name,
                "driver dropped without dispose"
            );
        }
    }
}

#[async_trait]
impl Navigation for AppDriver {
    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn back(&self) -> Result<(), DriverError> {
        self.backend()?.back().await
    }

    #[tracing::instrument(level = "debug", skip(self, text), fields(session_id = %self.session_id))]
    async fn input_text(&self, text: &str) -> Result<(), DriverError> {
        self.backend()?.input_text(text).await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn key_press(&self, key_code: u32) -> Result<(), DriverError> {
        self.backend()?.key_press(key_code).await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn open_uri(&self, uri: &str) -> Result<(), DriverError> {
        self.backend()?.open_uri(uri).await
    }
}

#[async_trait]
impl ElementQuery for AppDriver {
    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn find_elements(
        &self,
        property_name: &str,
        pattern: &str,
        is_expression: bool,
        ancestor_id: Option<&str>,
    ) -> Result<Vec<Element>, DriverError> {
        self.backend()?
            .find_elements(property_name, pattern, is_expression, ancestor_id)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn get_elements(&self) -> Result<Vec<Element>, DriverError> {
        self.backend()?.get_elements().await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn get_property(
        &self,
        element_id: &str,
        property_name: &str,
    ) -> Result<String, DriverError> {
        self.backend()?.get_property(element_id, property_name).await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn perform_action(
        &self,
        action: &str,
        element_id: &str,
        arguments: &[String],
    ) -> Result<PerformActionResult, DriverError> {
        self.backend()?
            .perform_action(action, element_id, arguments)
            .await
    }
}

#[async_trait]
impl Gestures for AppDriver {
    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn tap(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.backend()?.tap(x, y).await
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, element),
        fields(session_id = %self.session_id, element_id = %element.id)
    )]
    async fn tap_element(&self, element: &Element) -> Result<(), DriverError> {
        self.backend()?.tap_element(element).await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn long_press(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.backend()?.long_press(x, y).await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn swipe(&self, start: Point, end: Point) -> Result<(), DriverError> {
        self.backend()?.swipe(start, end).await
    }
}

#[async_trait]
impl AppLifecycle for AppDriver {
    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn install_app(&self) -> Result<(), DriverError> {
        self.backend()?.install_app().await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn remove_app(&self) -> Result<(), DriverError> {
        self.backend()?.remove_app().await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn launch_app(&self) -> Result<(), DriverError> {
        self.backend()?.launch_app().await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn stop_app(&self) -> Result<(), DriverError> {
        self.backend()?.stop_app().await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn clear_app_state(&self) -> Result<(), DriverError> {
        self.backend()?.clear_app_state().await
    }
}

#[async_trait]
impl FileTransfer for AppDriver {
    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn pull_file(
        &self,
        remote_file: &str,
        local_directory: &Path,
    ) -> Result<(), DriverError> {
        self.backend()?.pull_file(remote_file, local_directory).await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn push_file(
        &self,
        local_file: &Path,
        destination_directory: &str,
    ) -> Result<(), DriverError> {
        self.backend()?
            .push_file(local_file, destination_directory)
            .await
    }
}

#[async_trait]
impl Backend for AppDriver {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(level = "debug", skip(self), fields(session_id = %self.session_id))]
    async fn get_device_info(&self) -> Result<DeviceInfo, DriverError> {
        self.backend()?.get_device_info().await
    }

    /// Dispose the backend exactly once.
    ///
    /// The backend is dropped even when its own disposal fails; that failure
    /// is logged and returned. Later calls are no-ops.
    async fn dispose(&mut self) -> Result<(), DriverError> {
        let Some(mut backend) = self.backend.take() else {
            return Ok(());
        };
        let result = backend.dispose().await;
        drop(backend);
        match &result {
            Ok(()) => tracing::info!(session_id = %self.session_id, backend = %self.name, "driver disposed"),
            Err(err) => tracing::warn!(
                session_id = %self.session_id,
                backend = %self.name,
                error = %err,
                "backend disposal failed"
            ),
        }
        result
    }
}
