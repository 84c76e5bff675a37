//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, DeviceFlags, OutputFlags};
use crate::commands;

/// Locate, gate and run kernel test binaries on an Android device
#[derive(Parser)]
#[command(
    name = "ktest",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Enable debug logging on stderr (overrides `KTEST_LOG`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// adb serial of the target device
    #[arg(short, long, global = true, env = "ANDROID_SERIAL")]
    pub serial: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run configured test modules
    Run(commands::run::RunArgs),

    /// Find a file by exact name below a device directory
    Locate(commands::locate::LocateArgs),

    /// Run `find` on the device
    Find(commands::find::FindArgs),

    /// Run a shell command on the device
    Exec(commands::exec::ExecArgs),

    /// Evaluate the architecture gate for an ABI
    Gate(commands::gate::GateArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            serial,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            device: DeviceFlags { serial },
        });

        match command {
            Command::Run(args) => commands::run::run(&app, &args).await,
            Command::Locate(args) => commands::locate::run(&app, &args).await,
            Command::Find(args) => commands::find::run(&app, &args).await,
            Command::Exec(args) => commands::exec::run(&app, &args).await,
            Command::Gate(args) => commands::gate::run(&app, &args),
            Command::Config(cmd) => commands::config::run(&app, &cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
