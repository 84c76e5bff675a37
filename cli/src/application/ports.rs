//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{CommandOutcome, KtestConfig, RemotePath, TransportError};

// ── Device Transport Port ─────────────────────────────────────────────────────

/// Channel for shell commands and filesystem queries against one device.
///
/// Any call may fail with [`TransportError::ConnectivityLost`]. Callers in
/// this crate never retry; they propagate.
#[allow(async_fn_in_trait)]
pub trait DeviceTransport {
    /// Identity of the device (serial or a placeholder) for logs and errors.
    fn device(&self) -> &str;

    /// Run `command` through the device shell.
    ///
    /// `timeout` of `None` uses the transport's own default. A command that
    /// ran to completion is reported as `Ok`, whatever its exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be issued or the device is gone.
    async fn execute_shell(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<CommandOutcome, TransportError>;

    /// `true` if `path` exists and is a directory.
    async fn is_directory(&self, path: &RemotePath) -> Result<bool, TransportError>;

    /// Full paths of the immediate children of `path`, in the order the
    /// device reports them. A directory that cannot be read lists as empty;
    /// only transport failures are errors.
    async fn list_children(&self, path: &RemotePath) -> Result<Vec<RemotePath>, TransportError>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts local process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout the child must be killed and the error must downcast to
    /// [`crate::domain::CommandTimedOut`].
    async fn run_with_timeout(&self, program: &str, args: &[&str], timeout: Duration)
    -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a failure message.
    fn fail(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none is stored.
    fn load(&self) -> Result<KtestConfig>;
    /// Persist the configuration.
    fn save(&self, config: &KtestConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
