//! Infrastructure implementation of the `DeviceTransport` port over adb.
//!
//! `AdbTransport<R>` routes every device query through a `CommandRunner`
//! as `adb [-s <serial>] shell <command>`.

use std::process::Output;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::ports::{CommandRunner, DeviceTransport};
use crate::domain::config::DeviceConfig;
use crate::domain::{
    CommandOutcome, CommandStatus, CommandTimedOut, RemotePath, TransportError, shell_quote,
};
use crate::infra::command_runner::TokioCommandRunner;

/// Complete adb client error lines that mean the device is gone.
const DISCONNECT_LINES: &[&str] = &[
    "error: device offline",
    "error: no devices/emulators found",
    "error: closed",
    "adb: device offline",
    "adb: no devices/emulators found",
];

/// adb client errors that carry trailing detail after a fixed prefix.
const DISCONNECT_PREFIXES: &[&str] = &[
    "error: device unauthorized.",
    "error: device still authorizing",
    "error: protocol fault (",
];

/// Label used in logs and errors when no serial is configured.
const ANY_DEVICE: &str = "<default device>";

/// Infrastructure adapter that turns transport calls into `adb shell` invocations.
///
/// Generic over `R: CommandRunner` so that tests can inject a scripted
/// runner without spawning real processes.
pub struct AdbTransport<R: CommandRunner> {
    runner: R,
    adb: String,
    serial: Option<String>,
    query_timeout: Duration,
}

impl<R: CommandRunner> AdbTransport<R> {
    pub fn new(
        runner: R,
        adb: impl Into<String>,
        serial: Option<String>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            runner,
            adb: adb.into(),
            serial,
            query_timeout,
        }
    }

    /// The underlying command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn shell_args<'a>(&'a self, command: &'a str) -> Vec<&'a str> {
        let mut args = Vec::with_capacity(4);
        if let Some(serial) = &self.serial {
            args.push("-s");
            args.push(serial.as_str());
        }
        args.push("shell");
        args.push(command);
        args
    }

    /// Run a filesystem query. A query that does not answer within the
    /// query timeout is treated as a lost device.
    async fn query(&self, command: &str) -> Result<CommandOutcome, TransportError> {
        let outcome = self.execute_shell(command, Some(self.query_timeout)).await?;
        if outcome.status == CommandStatus::TimedOut {
            return Err(TransportError::ConnectivityLost {
                device: self.device().to_string(),
                reason: format!("no response to '{command}' within {:?}", self.query_timeout),
            });
        }
        Ok(outcome)
    }

    fn classify(&self, output: &Output) -> Result<CommandOutcome, TransportError> {
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        // adb reports its own failures with a non-zero exit.
        if !output.status.success() {
            if let Some(reason) = disconnect_reason(&stderr) {
                warn!(device = self.device(), reason, "device connection lost");
                return Err(TransportError::ConnectivityLost {
                    device: self.device().to_string(),
                    reason: reason.to_string(),
                });
            }
        }

        Ok(match output.status.code() {
            Some(code) => CommandOutcome::completed(code, stdout, stderr),
            // Killed by a signal: it ran, but did not complete normally.
            None => CommandOutcome::new(CommandStatus::Failed, stdout, stderr, None),
        })
    }
}

impl AdbTransport<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn from_config(device: &DeviceConfig) -> Self {
        let query_timeout = Duration::from_secs(device.query_timeout_secs);
        Self::new(
            TokioCommandRunner::new(query_timeout),
            device.adb_path.clone(),
            device.serial.clone(),
            query_timeout,
        )
    }
}

impl<R: CommandRunner> DeviceTransport for AdbTransport<R> {
    fn device(&self) -> &str {
        self.serial.as_deref().unwrap_or(ANY_DEVICE)
    }

    async fn execute_shell(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<CommandOutcome, TransportError> {
        let args = self.shell_args(command);
        let result = match timeout {
            Some(timeout) => self.runner.run_with_timeout(&self.adb, &args, timeout).await,
            None => self.runner.run(&self.adb, &args).await,
        };

        match result {
            Ok(output) => self.classify(&output),
            Err(err) => match err.downcast_ref::<CommandTimedOut>() {
                Some(timed_out) => Ok(CommandOutcome::timed_out("", timed_out.to_string())),
                None => Err(TransportError::Invocation(format!("{err:#}"))),
            },
        }
    }

    async fn is_directory(&self, path: &RemotePath) -> Result<bool, TransportError> {
        let command = format!("test -d {}", shell_quote(path.as_str()));
        let outcome = self.query(&command).await?;
        match outcome.exit_code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(TransportError::Invocation(format!(
                "'{command}' did not complete: {outcome}"
            ))),
        }
    }

    async fn list_children(&self, path: &RemotePath) -> Result<Vec<RemotePath>, TransportError> {
        let command = format!("ls -1 -A {}", shell_quote(path.as_str()));
        let outcome = self.query(&command).await?;
        if !outcome.is_success() {
            warn!(
                device = self.device(),
                dir = %path,
                stderr = outcome.stderr.trim(),
                "directory not listable, treating as empty"
            );
            return Ok(Vec::new());
        }
        let children: Vec<RemotePath> = outcome
            .stdout
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|name| !name.is_empty())
            .map(|name| path.join(name))
            .collect();
        debug!(device = self.device(), dir = %path, entries = children.len(), "listed");
        Ok(children)
    }
}

/// The adb client's own error line, if it reports a lost or unusable device.
///
/// Lines are matched against adb's exact messages. Output of the remote
/// command that merely mentions "closed" or "not found" is left alone.
fn disconnect_reason(stderr: &str) -> Option<&str> {
    stderr.lines().map(str::trim).find(|line| {
        DISCONNECT_LINES.contains(line)
            || DISCONNECT_PREFIXES
                .iter()
                .any(|prefix| line.starts_with(prefix))
            || is_missing_device(line)
    })
}

/// `adb: device 'SERIAL' not found` or `error: device 'SERIAL' not found`.
fn is_missing_device(line: &str) -> bool {
    ["adb: device '", "error: device '"]
        .iter()
        .filter_map(|prefix| line.strip_prefix(prefix))
        .filter_map(|rest| rest.strip_suffix("' not found"))
        .any(|serial| !serial.is_empty() && !serial.contains('\''))
}
