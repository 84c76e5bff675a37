//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` runs local programs (here: `adb`) with a hard
//! timeout, killing the child when it fires.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::application::ports::CommandRunner;
use crate::domain::CommandTimedOut;

/// Default timeout for short `adb` invocations (directory tests, listings).
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `CommandRunner`: uses tokio for async process execution
/// with guaranteed timeout and kill on all platforms.
///
/// `tokio::time::timeout` around `.output().await` does not kill the child
/// on Windows, so the timeout branch kills it explicitly.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CMD_TIMEOUT)
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        debug!(program, ?args, ?timeout, "spawning");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        // Drain both pipes while waiting; a child that fills the pipe buffer
        // would otherwise block forever.
        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                return Err(CommandTimedOut {
                    program: program.to_string(),
                    timeout,
                }
                .into());
            }
        }
    }
}
