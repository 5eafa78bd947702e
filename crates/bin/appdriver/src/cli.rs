//! Command line surface: one subcommand per contract operation.

use std::path::PathBuf;

use appdriver_app::builder::AppDriverBuilder;
use appdriver_app::ports::Backend;
use appdriver_domain::error::DriverError;
use appdriver_domain::geometry::Point;
use appdriver_domain::platform::Platform;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

#[derive(Debug, Parser)]
#[command(name = "appdriver")]
#[command(about = "Drive apps on Android, Apple, and Windows devices through one interface")]
#[command(version)]
pub struct Cli {
    /// Automation configuration (`.yaml` or `.json`).
    #[arg(short, long)]
    pub config: PathBuf,

    /// Host settings file (tool paths, logging).
    #[arg(long, default_value = crate::config::DEFAULT_PATH)]
    pub settings: PathBuf,

    /// Override the configured device.
    #[arg(long)]
    pub device: Option<String>,

    /// Override the configured app id.
    #[arg(long)]
    pub app_id: Option<String>,

    /// Override the configured device platform.
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Print the commands that would run instead of running them.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Describe the connected device
    Info,
    /// Press the platform back button
    Back,
    /// Clear the app's stored state
    Clear,
    /// Dump the full UI tree
    Elements,
    /// Find elements whose property matches a pattern
    Find {
        property: String,
        pattern: String,
        /// Treat the pattern as a regular expression
        #[arg(long)]
        expression: bool,
        /// Only search below this element
        #[arg(long)]
        ancestor: Option<String>,
    },
    /// Read one property of an element
    Property { element: String, name: String },
    /// Apply a named action to an element
    Action {
        action: String,
        element: String,
        arguments: Vec<String>,
    },
    /// Type text into the focused input
    Text { text: String },
    /// Install the configured app
    Install,
    /// Uninstall the configured app
    Remove,
    /// Launch the configured app
    Launch,
    /// Stop the configured app
    Stop,
    /// Send a single key event
    Key { code: u32 },
    /// Press and hold at coordinates
    LongPress { x: i32, y: i32 },
    /// Open a URI or deep link
    Open { uri: String },
    /// Copy a file from the device into a local directory
    Pull { remote: String, local_dir: PathBuf },
    /// Copy a local file onto the device
    Push { local: PathBuf, dest_dir: String },
    /// Swipe between two points
    Swipe { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Tap at coordinates
    Tap { x: i32, y: i32 },
}

impl Cli {
    /// Apply the command line overrides on top of a loaded builder.
    #[must_use]
    pub fn apply_overrides(&self, mut builder: AppDriverBuilder) -> AppDriverBuilder {
        if let Some(device) = &self.device {
            builder = builder.using_device(device.clone());
        }
        if let Some(app_id) = &self.app_id {
            builder = builder.with_app_id(app_id.clone());
        }
        if let Some(platform) = self.platform {
            builder = builder.on_device_platform(platform);
        }
        builder
    }
}

fn ok() -> Value {
    json!({ "ok": true })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, DriverError> {
    serde_json::to_value(value).map_err(|err| DriverError::Backend(Box::new(err)))
}

/// Run one command against `driver` and render its result as JSON.
///
/// # Errors
///
/// Returns whatever the backend returns; nothing is translated.
pub async fn execute<B: Backend + ?Sized>(
    driver: &B,
    command: &Command,
) -> Result<Value, DriverError> {
    match command {
        Command::Info => to_json(&driver.get_device_info().await?),
        Command::Back => driver.back().await.map(|()| ok()),
        Command::Clear => driver.clear_app_state().await.map(|()| ok()),
        Command::Elements => to_json(&driver.get_elements().await?),
        Command::Find {
            property,
            pattern,
            expression,
            ancestor,
        } => to_json(
            &driver
                .find_elements(property, pattern, *expression, ancestor.as_deref())
                .await?,
        ),
        Command::Property { element, name } => {
            let value = driver.get_property(element, name).await?;
            Ok(json!({ "value": value }))
        }
        Command::Action {
            action,
            element,
            arguments,
        } => to_json(&driver.perform_action(action, element, arguments).await?),
        Command::Text { text } => driver.input_text(text).await.map(|()| ok()),
        Command::Install => driver.install_app().await.map(|()| ok()),
        Command::Remove => driver.remove_app().await.map(|()| ok()),
        Command::Launch => driver.launch_app().await.map(|()| ok()),
        Command::Stop => driver.stop_app().await.map(|()| ok()),
        Command::Key { code } => driver.key_press(*code).await.map(|()| ok()),
        Command::LongPress { x, y } => driver.long_press(*x, *y).await.map(|()| ok()),
        Command::Open { uri } => driver.open_uri(uri).await.map(|()| ok()),
        Command::Pull { remote, local_dir } => {
            driver.pull_file(remote, local_dir).await.map(|()| ok())
        }
        Command::Push { local, dest_dir } => {
            driver.push_file(local, dest_dir).await.map(|()| ok())
        }
        Command::Swipe { x1, y1, x2, y2 } => driver
            .swipe(Point::new(*x1, *y1), Point::new(*x2, *y2))
            .await
            .map(|()| ok()),
        Command::Tap { x, y } => driver.tap(*x, *y).await.map(|()| ok()),
    }
}

/// Run one command, then dispose of `driver` whatever the outcome.
///
/// A disposal failure is logged. It is returned only when the command
/// itself succeeded, so it never hides the command's error.
///
/// # Errors
///
/// Returns the command's error, or else the disposal error.
pub async fn run<B: Backend + ?Sized>(
    driver: &mut B,
    command: &Command,
) -> Result<Value, DriverError> {
    let result = execute(driver, command).await;
    match driver.dispose().await {
        Ok(()) => result,
        Err(err) => {
            tracing::warn!(backend = driver.name(), error = %err, "dispose failed");
            result.and(Err(err))
        }
    }
}
