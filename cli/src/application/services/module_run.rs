//! Single-module pipeline: gate, then locate, then execute.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use tracing::{info, warn};

use crate::application::ports::DeviceTransport;
use crate::application::services::{executor, locator};
use crate::domain::{
    CommandOutcome, InputError, ModuleError, ModuleInvocation, RemotePath, ResolvedModule,
    RunDecision, SearchSpec, arch, shell_quote,
};

/// Everything one module run needs, fixed before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePlan {
    pub invocation: ModuleInvocation,
    pub search: SearchSpec,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ModulePlan {
    /// Build a plan from a configured module and the device ABI.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovery root or binary name is empty.
    pub fn new(module: &ResolvedModule, abi: &str) -> Result<Self, InputError> {
        let root = RemotePath::new(module.root.clone())?;
        Ok(Self {
            invocation: ModuleInvocation::new(&module.name, abi, module.arch.clone()),
            search: SearchSpec::new(root, module.binary.clone())?,
            args: module.args.clone(),
            timeout: module.timeout,
        })
    }
}

/// A module run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRun {
    Passed {
        binary: RemotePath,
        outcome: CommandOutcome,
    },
    /// The gate excluded the module; nothing was searched or executed.
    Bypassed(RunDecision),
}

/// Shell command line for the located binary plus its arguments.
#[must_use]
pub fn binary_command(binary: &RemotePath, args: &[String]) -> String {
    std::iter::once(binary.as_str())
        .chain(args.iter().map(String::as_str))
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run one module: gate → locate → execute, strictly in that order.
///
/// A module passes only when the binary's execution reports `SUCCESS`.
///
/// # Errors
///
/// - [`ModuleError::BinaryNotFound`] when no binary exists under the root
///   (execution is not attempted)
/// - [`ModuleError::CommandUnsuccessful`] for any non-`SUCCESS` outcome
/// - [`ModuleError::Transport`] when the device is lost mid-run
pub async fn run_module(
    transport: &impl DeviceTransport,
    plan: &ModulePlan,
) -> Result<ModuleRun, ModuleError> {
    let module = plan.invocation.module_name.as_str();

    let decision = arch::evaluate(&plan.invocation);
    if decision != RunDecision::Run {
        warn!(
            module,
            abi = %plan.invocation.module_abi,
            declared_arch = plan.invocation.declared_arch.as_deref().unwrap_or_default(),
            ?decision,
            "module excluded by architecture gate"
        );
        return Ok(ModuleRun::Bypassed(decision));
    }

    let Some(binary) = locator::locate(transport, &plan.search).await? else {
        return Err(ModuleError::BinaryNotFound {
            root: plan.search.root().to_string(),
            name: plan.search.name().to_string(),
        });
    };

    let command = binary_command(&binary, &plan.args);
    info!(module, %binary, "running test binary");
    let outcome = executor::execute(transport, &command, plan.timeout).await?;

    if outcome.is_success() {
        Ok(ModuleRun::Passed { binary, outcome })
    } else {
        Err(ModuleError::CommandUnsuccessful { command, outcome })
    }
}
