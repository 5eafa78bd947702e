//! Command port: running platform tooling (`adb`, `xcrun`, `powershell`).

use appdriver_domain::error::DriverError;
use async_trait::async_trait;

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run that printed `stdout`.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and `stderr`.
    #[must_use]
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Errors raised while running an external command.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The program could not be started at all.
    #[error("failed to start {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("{program} exited with status {status:?}: {stderr}")]
    Failed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },
}

impl From<ProcessError> for DriverError {
    fn from(err: ProcessError) -> Self {
        DriverError::Backend(Box::new(err))
    }
}

/// Runs external programs on behalf of a backend.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and capture its output, whatever the exit
    /// status.
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ProcessError>;

    /// Run `program` and return its stdout, failing on a non-zero exit.
    async fn run_checked(&self, program: &str, args: &[String]) -> Result<String, ProcessError> {
        let output = self.run(program, args).await?;
        if output.is_success() {
            Ok(output.stdout)
        } else {
            Err(ProcessError::Failed {
                program: program.to_string(),
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}
