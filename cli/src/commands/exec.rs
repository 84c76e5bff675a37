//! `ktest exec`: run one shell command on the device with a timeout.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::executor::execute;
use crate::commands::execution_timeout;
use crate::infra::adb::AdbTransport;
use crate::output::{json, progress};

/// Arguments for the exec command.
#[derive(Args)]
#[command(trailing_var_arg = true)]
pub struct ExecArgs {
    /// Timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Command and arguments, joined with spaces and run by the device shell
    #[arg(required = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Run the command and print its outcome.
///
/// Exits with success only for a `SUCCESS` outcome.
///
/// # Errors
///
/// Returns an error if the device connection is lost.
pub async fn run(app: &AppContext, args: &ExecArgs) -> Result<ExitCode> {
    let config = app.config()?;
    let timeout = execution_timeout(&config, args.timeout);
    let transport = AdbTransport::from_config(&config.device);
    let command = args.command.join(" ");

    let outcome = progress::with_spinner(
        app.show_progress(),
        &format!("Running {command}"),
        execute(&transport, &command, timeout),
    )
    .await?;

    if app.is_json() {
        json::print(&outcome)?;
    } else {
        app.renderer().render_outcome(&outcome);
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
