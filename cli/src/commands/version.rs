//! Version command

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::output::json;

/// Run the version command.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let version = env!("CARGO_PKG_VERSION");

    if app.is_json() {
        json::print(&serde_json::json!({ "version": version }))?;
    } else {
        println!("ktest {version}");
    }
    Ok(ExitCode::SUCCESS)
}
