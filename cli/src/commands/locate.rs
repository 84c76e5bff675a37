//! `ktest locate`: depth-first search for a file by exact name.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::locator::locate;
use crate::domain::{RemotePath, SearchSpec};
use crate::infra::adb::AdbTransport;
use crate::output::json;

/// Arguments for the locate command.
#[derive(Args)]
pub struct LocateArgs {
    /// Device directory to search from
    pub root: String,
    /// Exact file name to look for
    pub name: String,
}

/// Print the first path under `root` whose last segment is `name`.
///
/// Exits with failure when nothing matches.
///
/// # Errors
///
/// Returns an error for empty arguments or a lost device connection.
pub async fn run(app: &AppContext, args: &LocateArgs) -> Result<ExitCode> {
    let spec = SearchSpec::new(RemotePath::new(args.root.as_str())?, args.name.as_str())?;
    let config = app.config()?;
    let transport = AdbTransport::from_config(&config.device);

    let found = locate(&transport, &spec).await?;

    if app.is_json() {
        json::print(&serde_json::json!({
            "root": spec.root(),
            "name": spec.name(),
            "path": found,
        }))?;
    } else {
        app.renderer().render_located(spec.root(), spec.name(), found.as_ref());
    }

    Ok(if found.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
