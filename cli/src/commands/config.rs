//! `ktest config`: show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use tracing::debug;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::output::json;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Print the config file location
    Path,
    /// Set configuration value
    Set {
        /// Configuration key, e.g. `device.serial`
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the config cannot be read, validated or written.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Path => show_path(app),
        ConfigCommand::Set { key, value } => set_config(app, key, value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = app.config_store.load()?;
    let path = app.config_store.path()?;
    if app.is_json() {
        json::print(&config)?;
    } else {
        app.renderer().render_config(&config, &path);
    }
    Ok(ExitCode::SUCCESS)
}

fn show_path(app: &AppContext) -> Result<ExitCode> {
    let path = app.config_store.path()?;
    if app.is_json() {
        json::print(&serde_json::json!({ "path": path }))?;
    } else {
        println!("{}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    let mut config = app.config_store.load()?;
    config.apply(key, value)?;
    app.config_store.save(&config)?;
    debug!(key, value, "config updated");

    if app.is_json() {
        json::print(&serde_json::json!({ "key": key, "value": value }))?;
    } else {
        app.output.success(&format!("Set {key} = {value}"));
    }
    Ok(ExitCode::SUCCESS)
}
