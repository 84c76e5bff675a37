//! `ktest find`: run `find` on the device and list matching paths.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::file_finder::{find_files, try_find_files};
use crate::commands::execution_timeout;
use crate::domain::RemotePath;
use crate::infra::adb::AdbTransport;
use crate::output::json;

/// Arguments for the find command.
#[derive(Args)]
pub struct FindArgs {
    /// Device directory to search
    pub path: String,

    /// `-name` pattern, e.g. `'*.so'`
    pub pattern: String,

    /// Extra `find` options, passed through after `--` (e.g. `-- -type f`)
    #[arg(last = true, allow_hyphen_values = true)]
    pub options: Vec<String>,

    /// Fail when `find` itself fails instead of reporting no matches
    #[arg(long)]
    pub strict: bool,

    /// Timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Print every path `find` reports, in output order.
///
/// # Errors
///
/// Returns an error for an empty path, a lost device connection, or (with
/// `--strict`) a `find` that did not succeed.
pub async fn run(app: &AppContext, args: &FindArgs) -> Result<ExitCode> {
    let path = RemotePath::new(args.path.as_str())?;
    let config = app.config()?;
    let timeout = execution_timeout(&config, args.timeout);
    let transport = AdbTransport::from_config(&config.device);

    let found = if args.strict {
        try_find_files(&transport, &path, &args.pattern, &args.options, timeout).await?
    } else {
        find_files(&transport, &path, &args.pattern, &args.options, timeout).await?
    };

    if app.is_json() {
        json::print(&found)?;
    } else {
        app.renderer().render_paths(&found);
    }
    Ok(ExitCode::SUCCESS)
}
