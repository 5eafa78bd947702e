//! In-process [`CommandRunner`] implementations.
//!
//! [`SystemCommandRunner`] spawns real processes through `tokio::process`.
//! [`RecordingCommandRunner`] never spawns anything: it records every
//! invocation and answers from a queue of canned outputs, which backs both
//! dry runs and backend tests.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::process::Command;

use crate::ports::{CommandOutput, CommandRunner, ProcessError};

/// Runs commands on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ProcessError> {
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(status = ?result.status, "command finished");
        Ok(result)
    }
}

/// One recorded call to [`RecordingCommandRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Records invocations instead of running them.
///
/// Replies are consumed in order; once the queue is empty every command
/// succeeds with empty output.
#[derive(Debug, Default)]
pub struct RecordingCommandRunner {
    invocations: Mutex<Vec<Invocation>>,
    replies: Mutex<VecDeque<CommandOutput>>,
}

impl RecordingCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output for the next unanswered invocation.
    pub fn reply(&self, output: CommandOutput) -> &Self {
        lock(&self.replies).push_back(output);
        self
    }

    /// Every invocation so far, oldest first.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        lock(&self.invocations).clone()
    }

    /// Every invocation rendered as a single space-joined line.
    #[must_use]
    pub fn command_lines(&self) -> Vec<String> {
        lock(&self.invocations)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ProcessError> {
        tracing::debug!(program, ?args, "recording command");
        lock(&self.invocations).push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });
        let reply = lock(&self.replies).pop_front();
        Ok(reply.unwrap_or_else(|| CommandOutput::success("")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn should_report_spawn_error_for_missing_program() {
        let runner = SystemCommandRunner;
        let result = runner
            .run("appdriver-definitely-not-a-real-program", &[])
            .await;
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }

    #[tokio::test]
    async fn should_record_invocations_in_order() {
        let runner = RecordingCommandRunner::new();
        runner.run("adb", &args(&["devices"])).await.unwrap();
        runner
            .run("adb", &args(&["shell", "input", "tap", "1", "2"]))
            .await
            .unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["adb devices", "adb shell input tap 1 2"]
        );
        assert_eq!(runner.invocations()[0].program, "adb");
    }

    #[tokio::test]
    async fn should_answer_from_queued_replies_then_default_to_success() {
        let runner = RecordingCommandRunner::new();
        runner
            .reply(CommandOutput::success("first"))
            .reply(CommandOutput::failure(2, "second"));

        let first = runner.run("x", &[]).await.unwrap();
        let second = runner.run("x", &[]).await.unwrap();
        let third = runner.run("x", &[]).await.unwrap();

        assert_eq!(first.stdout, "first");
        assert_eq!(second.status, Some(2));
        assert!(third.is_success());
        assert!(third.stdout.is_empty());
    }
}
