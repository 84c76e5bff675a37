//! `ktest gate`: evaluate the architecture gate offline.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::{ModuleInvocation, evaluate};
use crate::output::json;

/// Arguments for the gate command.
#[derive(Args)]
pub struct GateArgs {
    /// Device ABI, e.g. `arm64-v8a`
    #[arg(long)]
    pub abi: String,

    /// Architecture the module is restricted to, e.g. `arm64`
    #[arg(long)]
    pub arch: Option<String>,

    /// Module name, for display only
    #[arg(long, default_value = "module")]
    pub module: String,
}

/// Print the decision for the given ABI and declared architecture.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn run(app: &AppContext, args: &GateArgs) -> Result<ExitCode> {
    let invocation = ModuleInvocation::new(args.module.as_str(), args.abi.as_str(), args.arch.clone());
    let decision = evaluate(&invocation);

    if app.is_json() {
        json::print(&serde_json::json!({
            "module": invocation.module_name,
            "abi": invocation.module_abi,
            "arch": invocation.declared_arch,
            "decision": decision,
        }))?;
    } else {
        app.renderer().render_decision(&invocation, decision);
    }
    Ok(ExitCode::SUCCESS)
}
