//! `ktest run`: locate, gate and execute every configured module.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::run_plan::run_plan;
use crate::infra::adb::AdbTransport;
use crate::output::{SilentReporter, TerminalReporter, json};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Run only this module (repeatable; default: all configured modules)
    #[arg(short, long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Execution timeout in seconds for every module
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Run the selected modules one after another and print the summary.
///
/// Exits with failure when any module failed; bypassed modules do not count.
///
/// # Errors
///
/// Returns an error if the config is invalid, a module name is unknown, or
/// the device ABI cannot be read.
pub async fn run(app: &AppContext, args: &RunArgs) -> Result<ExitCode> {
    let config = app.config()?;
    let mut modules = config.select_modules(&args.modules)?;
    if let Some(secs) = args.timeout {
        for module in &mut modules {
            module.timeout = Duration::from_secs(secs);
        }
    }
    let transport = AdbTransport::from_config(&config.device);

    let summary = if app.is_json() {
        let summary = run_plan(&transport, &modules, config.query_timeout(), &SilentReporter).await?;
        json::print(&summary)?;
        summary
    } else {
        let reporter = TerminalReporter::new(&app.output);
        let summary = run_plan(&transport, &modules, config.query_timeout(), &reporter).await?;
        app.renderer().render_summary(&summary);
        summary
    };

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
