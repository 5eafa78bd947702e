//! In-memory backend used by the unit tests of this crate.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use appdriver_domain::action::PerformActionResult;
use appdriver_domain::device_info::DeviceInfo;
use appdriver_domain::element::Element;
use appdriver_domain::error::DriverError;
use appdriver_domain::geometry::Point;
use appdriver_domain::platform::Platform;
use async_trait::async_trait;

use crate::ports::{AppLifecycle, Backend, ElementQuery, FileTransfer, Gestures, Navigation};

/// One observed contract call, with its exact arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Back,
    InputText(String),
    KeyPress(u32),
    OpenUri(String),
    FindElements {
        property_name: String,
        pattern: String,
        is_expression: bool,
        ancestor_id: Option<String>,
    },
    GetElements,
    GetProperty {
        element_id: String,
        property_name: String,
    },
    PerformAction {
        action: String,
        element_id: String,
        arguments: Vec<String>,
    },
    Tap(i32, i32),
    TapElement(String),
    LongPress(i32, i32),
    Swipe(Point, Point),
    InstallApp,
    RemoveApp,
    LaunchApp,
    StopApp,
    ClearAppState,
    PullFile(String, PathBuf),
    PushFile(PathBuf, String),
    GetDeviceInfo,
    Dispose,
}

/// Shared log of calls, cloneable so a test can keep a handle after the
/// backend is boxed and moved into a driver.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Deterministic backend: answers from a fixed element tree and records
/// every call.
#[derive(Debug)]
pub(crate) struct FakeBackend {
    name: String,
    elements: Vec<Element>,
    device_info: DeviceInfo,
    log: CallLog,
    disposals: Arc<AtomicUsize>,
    fail_dispose: bool,
}

impl FakeBackend {
    pub(crate) fn new(name: &str) -> Self {
        let elements = vec![
            Element::builder()
                .id("0")
                .property("class", "Window")
                .build()
                .unwrap(),
            Element::builder()
                .id("0.0")
                .parent_id("0")
                .property("class", "Button")
                .property("text", "Login")
                .build()
                .unwrap(),
            Element::builder()
                .id("0.1")
                .parent_id("0")
                .property("class", "Entry")
                .property("text", "user@example.com")
                .build()
                .unwrap(),
        ];
        Self {
            name: name.to_string(),
            elements,
            device_info: DeviceInfo::new(Platform::Android, "fake-device"),
            log: CallLog::default(),
            disposals: Arc::new(AtomicUsize::new(0)),
            fail_dispose: false,
        }
    }

    /// A backend with the same answers but its own call log and counters.
    pub(crate) fn twin(&self) -> Self {
        Self {
            name: self.name.clone(),
            elements: self.elements.clone(),
            device_info: self.device_info.clone(),
            log: CallLog::default(),
            disposals: Arc::new(AtomicUsize::new(0)),
            fail_dispose: self.fail_dispose,
        }
    }

    pub(crate) fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub(crate) fn with_disposals(mut self, disposals: Arc<AtomicUsize>) -> Self {
        self.disposals = disposals;
        self
    }

    pub(crate) fn failing_dispose(mut self) -> Self {
        self.fail_dispose = true;
        self
    }

    pub(crate) fn log(&self) -> CallLog {
        self.log.clone()
    }

    fn element(&self, element_id: &str) -> Result<&Element, DriverError> {
        self.elements
            .iter()
            .find(|e| e.id == element_id)
            .ok_or_else(|| DriverError::ElementNotFound {
                element_id: element_id.to_string(),
            })
    }
}

#[async_trait]
impl Navigation for FakeBackend {
    async fn back(&self) -> Result<(), DriverError> {
        self.log.push(Call::Back);
        Ok(())
    }

    async fn input_text(&self, text: &str) -> Result<(), DriverError> {
        self.log.push(Call::InputText(text.to_string()));
        Ok(())
    }

    async fn key_press(&self, key_code: u32) -> Result<(), DriverError> {
        self.log.push(Call::KeyPress(key_code));
        Ok(())
    }

    async fn open_uri(&self, uri: &str) -> Result<(), DriverError> {
        self.log.push(Call::OpenUri(uri.to_string()));
        Ok(())
    }
}

#[async_trait]
impl ElementQuery for FakeBackend {
    async fn find_elements(
        &self,
        property_name: &str,
        pattern: &str,
        is_expression: bool,
        ancestor_id: Option<&str>,
    ) -> Result<Vec<Element>, DriverError> {
        self.log.push(Call::FindElements {
            property_name: property_name.to_string(),
            pattern: pattern.to_string(),
            is_expression,
            ancestor_id: ancestor_id.map(ToString::to_string),
        });
        Ok(self
            .elements
            .iter()
            .filter(|e| ancestor_id.is_none_or(|a| e.is_descendant_of(a)))
            .filter(|e| {
                e.property(property_name).is_some_and(|value| {
                    if is_expression {
                        value.contains(pattern)
                    } else {
                        value == pattern
                    }
                })
            })
            .cloned()
            .collect())
    }

    async fn get_elements(&self) -> Result<Vec<Element>, DriverError> {
        self.log.push(Call::GetElements);
        Ok(self.elements.clone())
    }

    async fn get_property(
        &self,
        element_id: &str,
        property_name: &str,
    ) -> Result<String, DriverError> {
        self.log.push(Call::GetProperty {
            element_id: element_id.to_string(),
            property_name: property_name.to_string(),
        });
        let element = self.element(element_id)?;
        Ok(element.property(property_name).unwrap_or_default().to_string())
    }

    async fn perform_action(
        &self,
        action: &str,
        element_id: &str,
        arguments: &[String],
    ) -> Result<PerformActionResult, DriverError> {
        self.log.push(Call::PerformAction {
            action: action.to_string(),
            element_id: element_id.to_string(),
            arguments: arguments.to_vec(),
        });
        self.element(element_id)?;
        match action {
            "click" => Ok(PerformActionResult::ok().with_message(arguments.join(","))),
            _ => Err(DriverError::UnsupportedAction {
                action: action.to_string(),
            }),
        }
    }
}

#[async_trait]
impl Gestures for FakeBackend {
    async fn tap(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.log.push(Call::Tap(x, y));
        Ok(())
    }

    async fn tap_element(&self, element: &Element) -> Result<(), DriverError> {
        self.log.push(Call::TapElement(element.id.clone()));
        self.element(&element.id).map(|_| ())
    }

    async fn long_press(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.log.push(Call::LongPress(x, y));
        Ok(())
    }

    async fn swipe(&self, start: Point, end: Point) -> Result<(), DriverError> {
        self.log.push(Call::Swipe(start, end));
        Ok(())
    }
}

#[async_trait]
impl AppLifecycle for FakeBackend {
    async fn install_app(&self) -> Result<(), DriverError> {
        self.log.push(Call::InstallApp);
        Ok(())
    }

    async fn remove_app(&self) -> Result<(), DriverError> {
        self.log.push(Call::RemoveApp);
        Ok(())
    }

    async fn launch_app(&self) -> Result<(), DriverError> {
        self.log.push(Call::LaunchApp);
        Ok(())
    }

    async fn stop_app(&self) -> Result<(), DriverError> {
        self.log.push(Call::StopApp);
        Ok(())
    }

    async fn clear_app_state(&self) -> Result<(), DriverError> {
        self.log.push(Call::ClearAppState);
        Ok(())
    }
}

#[async_trait]
impl FileTransfer for FakeBackend {
    async fn pull_file(
        &self,
        remote_file: &str,
        local_directory: &Path,
    ) -> Result<(), DriverError> {
        self.log
            .push(Call::PullFile(remote_file.to_string(), local_directory.to_path_buf()));
        Ok(())
    }

    async fn push_file(
        &self,
        local_file: &Path,
        destination_directory: &str,
    ) -> Result<(), DriverError> {
        self.log.push(Call::PushFile(
            local_file.to_path_buf(),
            destination_directory.to_string(),
        ));
        Ok(())
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_device_info(&self) -> Result<DeviceInfo, DriverError> {
        self.log.push(Call::GetDeviceInfo);
        Ok(self.device_info.clone())
    }

    async fn dispose(&mut self) -> Result<(), DriverError> {
        self.log.push(Call::Dispose);
        self.disposals.fetch_add(1, Ordering::SeqCst);
        if self.fail_dispose {
            return Err(DriverError::Backend(Box::new(std::io::Error::other(
                "session already closed",
            ))));
        }
        Ok(())
    }
}
