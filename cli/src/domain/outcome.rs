//! Structured result of one remote command execution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a remote command ended, as reported by the transport.
///
/// `Success` means the command ran and the transport reported a successful
/// completion. It is the only status that counts as a passing module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandStatus {
    Success,
    Failed,
    TimedOut,
    Exception,
}

impl CommandStatus {
    /// Wire name, e.g. `TIMED_OUT`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::TimedOut => "TIMED_OUT",
            Self::Exception => "EXCEPTION",
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of exactly one executed command. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub status: CommandStatus,
    pub stdout: String,
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl CommandOutcome {
    #[must_use]
    pub fn new(
        status: CommandStatus,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// The command ran to completion and exited with `exit_code`.
    ///
    /// Exit code zero maps to `Success`, anything else to `Failed`.
    #[must_use]
    pub fn completed(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        let status = if exit_code == 0 {
            CommandStatus::Success
        } else {
            CommandStatus::Failed
        };
        Self::new(status, stdout, stderr, Some(exit_code))
    }

    /// The wall-clock budget elapsed before the command returned.
    #[must_use]
    pub fn timed_out(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::new(CommandStatus::TimedOut, stdout, stderr, None)
    }

    /// The command could not be issued at all; `reason` lands in `stderr`.
    #[must_use]
    pub fn exception(reason: impl Into<String>) -> Self {
        Self::new(CommandStatus::Exception, String::new(), reason, None)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}", self.status)?;
        if let Some(code) = self.exit_code {
            write!(f, " (exit code {code})")?;
        }
        write!(
            f,
            "\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.stdout.trim_end(),
            self.stderr.trim_end()
        )
    }
}
