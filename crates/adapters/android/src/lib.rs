//! # appdriver-adapter-android
//!
//! Android backend: drives a device or emulator through `adb`.
//!
//! ## How it works
//!
//! Every operation is one or more `adb` invocations, optionally pinned to
//! a device with `-s <serial>`. The UI tree comes from
//! `uiautomator dump`, re-read on every element query so element handles
//! always reflect the current screen.
//!
//! | Operation | Command |
//! |-----------|---------|
//! | `tap` | `shell input tap x y` |
//! | `swipe` | `shell input swipe x1 y1 x2 y2` |
//! | `get_elements` | `exec-out uiautomator dump /dev/tty` |
//! | `launch_app` | `shell monkey -p <app> -c android.intent.category.LAUNCHER 1` |
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `appdriver-app` and `appdriver-domain`.

mod config;
pub mod device;
mod error;
pub mod hierarchy;

pub use config::AndroidConfig;
pub use error::AndroidError;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;

use appdriver_app::ports::{
    AppLifecycle, Backend, CommandRunner, ElementQuery, FileTransfer, Gestures, Navigation,
};
use appdriver_domain::action::PerformActionResult;
use appdriver_domain::configuration::AutomationConfiguration;
use appdriver_domain::device_info::DeviceInfo;
use appdriver_domain::element::Element;
use appdriver_domain::error::{DriverError, ValidationError};
use appdriver_domain::geometry::Point;

use crate::hierarchy::DumpParser;

const KEYCODE_BACK: u32 = 4;

/// Backend for Android devices and emulators.
pub struct AndroidBackend {
    config: AndroidConfig,
    configuration: AutomationConfiguration,
    runner: Arc<dyn CommandRunner>,
    parser: DumpParser,
}

impl AndroidBackend {
    /// Create a backend for the device named in `configuration`.
    ///
    /// # Errors
    ///
    /// Returns [`AndroidError::InvalidPattern`] if the dump tokenizers fail
    /// to compile.
    pub fn new(
        config: AndroidConfig,
        configuration: AutomationConfiguration,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self, AndroidError> {
        Ok(Self {
            config,
            configuration,
            runner,
            parser: DumpParser::new()?,
        })
    }

    async fn adb(&self, args: &[&str]) -> Result<String, AndroidError> {
        let mut full = Vec::with_capacity(args.len() + 2);
        if let Some(device) = self.configuration.device() {
            full.push("-s".to_string());
            full.push(device.to_string());
        }
        full.extend(args.iter().map(ToString::to_string));
        tracing::debug!(device = ?self.configuration.device(), ?args, "adb");
        Ok(self.runner.run_checked(&self.config.adb, &full).await?)
    }

    async fn shell(&self, args: &[&str]) -> Result<String, AndroidError> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push("shell");
        full.extend_from_slice(args);
        self.adb(&full).await
    }

    fn app_id(&self) -> Result<&str, AndroidError> {
        non_empty(&self.configuration.app_id)
    }

    fn app_filename(&self) -> Result<&str, AndroidError> {
        non_empty(&self.configuration.app_filename)
    }

    async fn dump(&self) -> Result<Vec<Element>, AndroidError> {
        let output = self
            .adb(&["exec-out", "uiautomator", "dump", "/dev/tty"])
            .await?;
        self.parser.parse(&output)
    }

    async fn element(&self, element_id: &str) -> Result<Element, AndroidError> {
        self.dump()
            .await?
            .into_iter()
            .find(|element| element.id == element_id)
            .ok_or_else(|| element_not_found(element_id))
    }

    fn center_of(&self, element: &Element) -> Result<Point, AndroidError> {
        element
            .property("bounds")
            .and_then(|bounds| self.parser.bounds(bounds))
            .map(|rect| rect.center())
            .ok_or_else(|| element_not_found(&element.id))
    }

    async fn tap_at(&self, point: Point) -> Result<(), AndroidError> {
        let (x, y) = (point.x.to_string(), point.y.to_string());
        self.shell(&["input", "tap", &x, &y]).await?;
        Ok(())
    }

    async fn long_press_at(&self, point: Point) -> Result<(), AndroidError> {
        let (x, y) = (point.x.to_string(), point.y.to_string());
        let duration = self.config.long_press_ms.to_string();
        self.shell(&["input", "swipe", &x, &y, &x, &y, &duration])
            .await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), AndroidError> {
        for chunk in input_text_chunks(text) {
            self.shell(&["input", "text", &chunk]).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for AndroidBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidBackend")
            .field("config", &self.config)
            .field("device", &self.configuration.device())
            .finish_non_exhaustive()
    }
}

fn non_empty(value: &str) -> Result<&str, AndroidError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AndroidError::Domain(ValidationError::MissingApp.into()));
    }
    Ok(value)
}

fn element_not_found(element_id: &str) -> AndroidError {
    AndroidError::Domain(DriverError::ElementNotFound {
        element_id: element_id.to_string(),
    })
}

/// Escaped `input text` arguments that together type `text`.
///
/// `input text` turns every `%s` into a space and has no escape for it, so
/// a literal `%` followed by `s` is split across two invocations.
fn input_text_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while let Some(index) = rest.find("%s") {
        chunks.push(escape_input_text(&rest[..=index]));
        rest = &rest[index + 1..];
    }
    chunks.push(escape_input_text(rest));
    chunks
}

/// Escape text for `input text`: spaces become `%s`, shell metacharacters
/// are backslash-escaped for the device shell.
fn escape_input_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => escaped.push_str("%s"),
            '\\' | '\'' | '"' | '(' | ')' | '&' | '<' | '>' | ';' | '|' | '*' | '~' | '$'
            | '`' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl Navigation for AndroidBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn back(&self) -> Result<(), DriverError> {
        self.key_press(KEYCODE_BACK).await
    }

    #[tracing::instrument(level = "debug", skip(self, text))]
    async fn input_text(&self, text: &str) -> Result<(), DriverError> {
        Ok(self.type_text(text).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn key_press(&self, key_code: u32) -> Result<(), DriverError> {
        let key_code = key_code.to_string();
        self.shell(&["input", "keyevent", &key_code]).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn open_uri(&self, uri: &str) -> Result<(), DriverError> {
        self.shell(&[
            "am",
            "start",
            "-a",
            "android.intent.action.VIEW",
            "-d",
            uri,
        ])
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ElementQuery for AndroidBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_elements(
        &self,
        property_name: &str,
        pattern: &str,
        is_expression: bool,
        ancestor_id: Option<&str>,
    ) -> Result<Vec<Element>, DriverError> {
        let expression = if is_expression {
            Some(Regex::new(pattern).map_err(AndroidError::InvalidPattern)?)
        } else {
            None
        };

        let matches = |value: &str| match &expression {
            Some(regex) => regex.is_match(value),
            None => value == pattern,
        };

        let found: Vec<Element> = self
            .dump()
            .await?
            .into_iter()
            .filter(|element| ancestor_id.is_none_or(|ancestor| element.is_descendant_of(ancestor)))
            .filter(|element| element.property(property_name).is_some_and(&matches))
            .collect();
        tracing::debug!(count = found.len(), "elements found");
        Ok(found)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_elements(&self) -> Result<Vec<Element>, DriverError> {
        Ok(self.dump().await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_property(
        &self,
        element_id: &str,
        property_name: &str,
    ) -> Result<String, DriverError> {
        let element = self.element(element_id).await?;
        Ok(element
            .property(property_name)
            .unwrap_or_default()
            .to_string())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn perform_action(
        &self,
        action: &str,
        element_id: &str,
        arguments: &[String],
    ) -> Result<PerformActionResult, DriverError> {
        if !matches!(action, "click" | "tap" | "long_press" | "set_text") {
            return Err(DriverError::UnsupportedAction {
                action: action.to_string(),
            });
        }

        let element = self.element(element_id).await?;
        let center = self.center_of(&element)?;
        match action {
            "long_press" => self.long_press_at(center).await?,
            "set_text" => {
                self.tap_at(center).await?;
                self.type_text(&arguments.join(" ")).await?;
            }
            _ => self.tap_at(center).await?,
        }
        Ok(PerformActionResult::ok())
    }
}

#[async_trait]
impl Gestures for AndroidBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn tap(&self, x: i32, y: i32) -> Result<(), DriverError> {
        Ok(self.tap_at(Point::new(x, y)).await?)
    }

    #[tracing::instrument(level = "debug", skip(self, element), fields(element_id = %element.id))]
    async fn tap_element(&self, element: &Element) -> Result<(), DriverError> {
        let center = self.center_of(element)?;
        Ok(self.tap_at(center).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn long_press(&self, x: i32, y: i32) -> Result<(), DriverError> {
        Ok(self.long_press_at(Point::new(x, y)).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn swipe(&self, start: Point, end: Point) -> Result<(), DriverError> {
        let coordinates = [start.x, start.y, end.x, end.y].map(|c: i32| c.to_string());
        let [x1, y1, x2, y2] = &coordinates;
        self.shell(&["input", "swipe", x1, y1, x2, y2]).await?;
        Ok(())
    }
}

#[async_trait]
impl AppLifecycle for AndroidBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn install_app(&self) -> Result<(), DriverError> {
        let app_filename = self.app_filename()?;
        self.adb(&["install", "-r", app_filename]).await?;
        tracing::info!(app_filename, "app installed");
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn remove_app(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        self.adb(&["uninstall", app_id]).await?;
        tracing::info!(app_id, "app removed");
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn launch_app(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        self.shell(&[
            "monkey",
            "-p",
            app_id,
            "-c",
            "android.intent.category.LAUNCHER",
            "1",
        ])
        .await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn stop_app(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        self.shell(&["am", "force-stop", app_id]).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn clear_app_state(&self) -> Result<(), DriverError> {
        let app_id = self.app_id()?;
        self.shell(&["pm", "clear", app_id]).await?;
        Ok(())
    }
}

#[async_trait]
impl FileTransfer for AndroidBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn pull_file(
        &self,
        remote_file: &str,
        local_directory: &Path,
    ) -> Result<(), DriverError> {
        let local_directory = local_directory.to_string_lossy();
        self.adb(&["pull", remote_file, &local_directory]).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn push_file(
        &self,
        local_file: &Path,
        destination_directory: &str,
    ) -> Result<(), DriverError> {
        let local_file = local_file.to_string_lossy();
        let destination = format!("{}/", destination_directory.trim_end_matches('/'));
        self.adb(&["push", &local_file, &destination]).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for AndroidBackend {
    fn name(&self) -> &str {
        "Android"
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_device_info(&self) -> Result<DeviceInfo, DriverError> {
        let props = device::parse_getprop(&self.shell(&["getprop"]).await?);
        let (width, height) = device::parse_wm_size(&self.shell(&["wm", "size"]).await?)?;
        let density = device::parse_wm_density(&self.shell(&["wm", "density"]).await?)?;

        let serial = self
            .configuration
            .device()
            .map(ToString::to_string)
            .or_else(|| props.get("ro.serialno").cloned())
            .unwrap_or_default();
        let prop = |key: &str| props.get(key).filter(|v| !v.is_empty()).cloned();

        let mut info = DeviceInfo::new(self.configuration.device_platform, serial);
        info.name = prop("ro.product.name");
        info.model = prop("ro.product.model");
        info.os_version = prop("ro.build.version.release");
        info.screen_width = Some(width);
        info.screen_height = Some(height);
        info.density = Some(density);
        Ok(info)
    }

    async fn dispose(&mut self) -> Result<(), DriverError> {
        tracing::debug!(device = ?self.configuration.device(), "android backend disposed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use appdriver_app::ports::CommandOutput;
    use appdriver_app::process::RecordingCommandRunner;
    use appdriver_domain::platform::Platform;

    use super::*;

    const DUMP: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?><hierarchy rotation="0"><node index="0" text="" class="android.widget.FrameLayout" bounds="[0,0][1080,1920]"><node index="0" text="Login" class="android.widget.Button" bounds="[40,100][1040,220]" /><node index="1" text="" class="android.widget.LinearLayout" bounds="[0,300][1080,900]"><node index="0" text="Login help" class="android.widget.TextView" bounds="[0,300][540,400]" /></node></node></hierarchy>"#;

    fn configuration(device: &str) -> AutomationConfiguration {
        AutomationConfiguration {
            device_platform: Platform::Android,
            device: device.to_string(),
            app_id: "com.example.app".to_string(),
            app_filename: "build/app.apk".to_string(),
            ..AutomationConfiguration::default()
        }
    }

    fn backend_on(device: &str) -> (AndroidBackend, Arc<RecordingCommandRunner>) {
        let runner = Arc::new(RecordingCommandRunner::new());
        let backend =
            AndroidBackend::new(AndroidConfig::default(), configuration(device), runner.clone())
                .unwrap();
        (backend, runner)
    }

    fn backend() -> (AndroidBackend, Arc<RecordingCommandRunner>) {
        backend_on("emulator-5554")
    }

    #[test]
    fn should_report_android_name() {
        let (backend, _) = backend();
        assert_eq!(backend.name(), "Android");
    }

    #[tokio::test]
    async fn should_tap_exactly_once_at_coordinates() {
        let (backend, runner) = backend();
        backend.tap(100, 200).await.unwrap();
        assert_eq!(
            runner.command_lines(),
            vec!["adb -s emulator-5554 shell input tap 100 200"]
        );
    }

    #[tokio::test]
    async fn should_omit_serial_for_default_device() {
        let (backend, runner) = backend_on("");
        backend.back().await.unwrap();
        assert_eq!(runner.command_lines(), vec!["adb shell input keyevent 4"]);
    }

    #[tokio::test]
    async fn should_map_gestures_and_navigation_to_input_commands() {
        let (backend, runner) = backend_on("");
        backend.key_press(66).await.unwrap();
        backend.long_press(5, 6).await.unwrap();
        backend
            .swipe(Point::new(1, 2), Point::new(3, 4))
            .await
            .unwrap();
        backend.open_uri("myapp://settings").await.unwrap();

        assert_eq!(
            runner.command_lines(),
            vec![
                "adb shell input keyevent 66",
                "adb shell input swipe 5 6 5 6 1000",
                "adb shell input swipe 1 2 3 4",
                "adb shell am start -a android.intent.action.VIEW -d myapp://settings",
            ]
        );
    }

    #[tokio::test]
    async fn should_escape_input_text() {
        let (backend, runner) = backend_on("");
        backend.input_text("it's a test & more").await.unwrap();
        assert_eq!(
            runner.invocations()[0].args,
            vec!["shell", "input", "text", r"it\'s%sa%stest%s\&%smore"]
        );
    }

    #[tokio::test]
    async fn should_split_literal_percent_s_across_commands() {
        let (backend, runner) = backend_on("");
        backend.input_text("50%sure").await.unwrap();
        assert_eq!(
            runner.command_lines(),
            vec!["adb shell input text 50%", "adb shell input text sure"]
        );
    }

    #[test]
    fn should_keep_percent_before_space_in_one_chunk() {
        assert_eq!(input_text_chunks("100% done"), vec!["100%%sdone"]);
        assert_eq!(input_text_chunks("%s%s"), vec!["%", "s%", "s"]);
        assert_eq!(input_text_chunks(""), vec![""]);
    }

    #[tokio::test]
    async fn should_map_app_lifecycle_to_adb_commands() {
        let (backend, runner) = backend();
        backend.install_app().await.unwrap();
        backend.launch_app().await.unwrap();
        backend.stop_app().await.unwrap();
        backend.clear_app_state().await.unwrap();
        backend.remove_app().await.unwrap();

        assert_eq!(
            runner.command_lines(),
            vec![
                "adb -s emulator-5554 install -r build/app.apk",
                "adb -s emulator-5554 shell monkey -p com.example.app -c android.intent.category.LAUNCHER 1",
                "adb -s emulator-5554 shell am force-stop com.example.app",
                "adb -s emulator-5554 shell pm clear com.example.app",
                "adb -s emulator-5554 uninstall com.example.app",
            ]
        );
    }

    #[tokio::test]
    async fn should_require_app_id_for_lifecycle() {
        let runner = Arc::new(RecordingCommandRunner::new());
        let configuration = AutomationConfiguration {
            app_id: String::new(),
            ..configuration("")
        };
        let backend =
            AndroidBackend::new(AndroidConfig::default(), configuration, runner.clone()).unwrap();

        let result = backend.launch_app().await;
        assert!(matches!(
            result,
            Err(DriverError::Validation(ValidationError::MissingApp))
        ));
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn should_transfer_files_with_push_and_pull() {
        let (backend, runner) = backend_on("");
        backend
            .push_file(Path::new("fixtures/data.db"), "/sdcard/Download/")
            .await
            .unwrap();
        backend
            .pull_file("/sdcard/log.txt", &PathBuf::from("out"))
            .await
            .unwrap();

        assert_eq!(
            runner.command_lines(),
            vec![
                "adb push fixtures/data.db /sdcard/Download/",
                "adb pull /sdcard/log.txt out",
            ]
        );
    }

    #[tokio::test]
    async fn should_read_elements_from_uiautomator_dump() {
        let (backend, runner) = backend();
        runner.reply(CommandOutput::success(DUMP));

        let elements = backend.get_elements().await.unwrap();

        assert_eq!(elements.len(), 4);
        assert_eq!(
            runner.command_lines(),
            vec!["adb -s emulator-5554 exec-out uiautomator dump /dev/tty"]
        );
    }

    #[tokio::test]
    async fn should_find_elements_by_literal_value() {
        let (backend, runner) = backend();
        runner.reply(CommandOutput::success(DUMP));

        let found = backend
            .find_elements("text", "Login", false, None)
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["0.0"]);
    }

    #[tokio::test]
    async fn should_find_elements_by_expression_under_ancestor() {
        let (backend, runner) = backend();
        runner.reply(CommandOutput::success(DUMP));
        runner.reply(CommandOutput::success(DUMP));

        let everywhere = backend
            .find_elements("text", "^Login", true, None)
            .await
            .unwrap();
        let scoped = backend
            .find_elements("text", "^Login", true, Some("0.1"))
            .await
            .unwrap();

        assert_eq!(everywhere.len(), 2);
        let ids: Vec<&str> = scoped.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["0.1.0"]);
    }

    #[tokio::test]
    async fn should_return_empty_when_nothing_matches() {
        let (backend, runner) = backend();
        runner.reply(CommandOutput::success(DUMP));

        let found = backend
            .find_elements("text", "Logout", false, None)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn should_reject_invalid_expression_without_dumping() {
        let (backend, runner) = backend();
        let result = backend.find_elements("text", "(", true, None).await;
        assert!(matches!(result, Err(DriverError::Backend(_))));
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn should_get_property_or_fail_with_element_not_found() {
        let (backend, runner) = backend();
        runner.reply(CommandOutput::success(DUMP));
        runner.reply(CommandOutput::success(DUMP));

        let class = backend.get_property("0.0", "class").await.unwrap();
        assert_eq!(class, "android.widget.Button");

        let missing = backend.get_property("7.7", "class").await;
        assert!(matches!(
            missing,
            Err(DriverError::ElementNotFound { element_id }) if element_id == "7.7"
        ));
    }

    #[tokio::test]
    async fn should_tap_element_at_center_of_bounds() {
        let (backend, runner) = backend_on("");
        let element = Element::builder()
            .id("0.0")
            .property("bounds", "[40,100][1040,220]")
            .build()
            .unwrap();

        backend.tap_element(&element).await.unwrap();
        assert_eq!(runner.command_lines(), vec!["adb shell input tap 540 160"]);
    }

    #[tokio::test]
    async fn should_fail_tap_element_without_bounds() {
        let (backend, runner) = backend_on("");
        let element = Element::builder().id("0.3").build().unwrap();

        let result = backend.tap_element(&element).await;
        assert!(matches!(result, Err(DriverError::ElementNotFound { .. })));
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn should_set_text_by_tapping_then_typing() {
        let (backend, runner) = backend_on("");
        runner.reply(CommandOutput::success(DUMP));

        let result = backend
            .perform_action("set_text", "0.0", &["hello".to_string(), "world".to_string()])
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(
            runner.command_lines(),
            vec![
                "adb exec-out uiautomator dump /dev/tty",
                "adb shell input tap 540 160",
                "adb shell input text hello%sworld",
            ]
        );
    }

    #[tokio::test]
    async fn should_reject_unknown_action() {
        let (backend, runner) = backend();
        let result = backend.perform_action("pinch", "0.0", &[]).await;
        assert!(matches!(
            result,
            Err(DriverError::UnsupportedAction { action }) if action == "pinch"
        ));
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn should_surface_adb_failures_as_backend_errors() {
        let (backend, runner) = backend();
        runner.reply(CommandOutput::failure(1, "error: device 'emulator-5554' not found"));

        let result = backend.tap(1, 1).await;
        assert!(matches!(result, Err(DriverError::Backend(_))));
    }

    #[tokio::test]
    async fn should_collect_device_info() {
        let (backend, runner) = backend();
        runner
            .reply(CommandOutput::success(
                "[ro.product.model]: [Pixel 7]\n[ro.product.name]: [panther]\n[ro.build.version.release]: [14]\n",
            ))
            .reply(CommandOutput::success("Physical size: 1080x2400\n"))
            .reply(CommandOutput::success("Physical density: 420\n"));

        let info = backend.get_device_info().await.unwrap();

        assert_eq!(info.platform, Platform::Android);
        assert_eq!(info.device, "emulator-5554");
        assert_eq!(info.model.as_deref(), Some("Pixel 7"));
        assert_eq!(info.name.as_deref(), Some("panther"));
        assert_eq!(info.os_version.as_deref(), Some("14"));
        assert_eq!(info.screen_width, Some(1080));
        assert_eq!(info.screen_height, Some(2400));
        assert_eq!(info.density, Some(420.0));
        assert_eq!(
            runner.command_lines(),
            vec![
                "adb -s emulator-5554 shell getprop",
                "adb -s emulator-5554 shell wm size",
                "adb -s emulator-5554 shell wm density",
            ]
        );
    }

    #[tokio::test]
    async fn should_dispose_idempotently() {
        let (mut backend, runner) = backend();
        backend.dispose().await.unwrap();
        backend.dispose().await.unwrap();
        assert!(runner.invocations().is_empty());
    }
}
