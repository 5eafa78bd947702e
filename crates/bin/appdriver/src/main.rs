//! # appdriver: command line driver
//!
//! Loads the automation configuration, builds a driver for its platform,
//! runs one command, and prints the result as JSON on stdout. Logs go to
//! stderr.

use std::sync::Arc;

use anyhow::Context;
use appdriver::cli::{self, Cli};
use appdriver::config::Config;
use appdriver_app::ports::{Backend, CommandRunner};
use appdriver_app::process::{RecordingCommandRunner, SystemCommandRunner};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.settings)
        .with_context(|| format!("loading settings from {}", cli.settings.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let recorder = cli.dry_run.then(|| Arc::new(RecordingCommandRunner::new()));
    let runner: Arc<dyn CommandRunner> = match &recorder {
        Some(recorder) => recorder.clone(),
        None => Arc::new(SystemCommandRunner),
    };

    let builder = appdriver::builder_with_runner(&config, runner)?
        .with_config(&cli.config)
        .with_context(|| format!("loading automation configuration {}", cli.config.display()))?;
    let mut driver = cli.apply_overrides(builder).build()?;
    tracing::info!(backend = driver.name(), command = ?cli.command, "running command");

    let result = cli::run(&mut driver, &cli.command).await;

    if let Some(recorder) = recorder {
        for line in recorder.command_lines() {
            eprintln!("{line}");
        }
    }
    let output = result.with_context(|| format!("{} backend failed", driver.name()))?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
