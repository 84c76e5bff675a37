//! ktest - locate, gate and run kernel test binaries on Android devices

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ktest_cli::cli::Cli;
use ktest_cli::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let as_json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            match json::format_error(&format!("{e:#}"), json::error_code(&e)) {
                Ok(doc) if as_json => println!("{doc}"),
                _ => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays clean for results and `--json`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("KTEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
