//! Run plan: execute a list of configured modules one after another.
//!
//! Failures stay local to their module: the plan records them and moves on.

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::application::ports::{DeviceTransport, ProgressReporter};
use crate::application::services::device;
use crate::application::services::module_run::{ModulePlan, ModuleRun, run_module};
use crate::domain::{ModuleError, ModuleReport, ModuleVerdict, ResolvedModule, RunSummary};

/// Run `modules` sequentially against one device.
///
/// Modules without a configured ABI share one `getprop` lookup, made the
/// first time such a module is reached.
///
/// # Errors
///
/// Returns an error only when the device ABI is needed and cannot be read;
/// individual module failures are recorded in the summary.
pub async fn run_plan(
    transport: &impl DeviceTransport,
    modules: &[ResolvedModule],
    query_timeout: Duration,
    reporter: &impl ProgressReporter,
) -> Result<RunSummary> {
    let mut device_abi: Option<String> = None;
    let mut reports = Vec::with_capacity(modules.len());

    for module in modules {
        let abi = if let Some(abi) = &module.abi {
            abi.clone()
        } else if let Some(abi) = &device_abi {
            abi.clone()
        } else {
            let abi = device::primary_abi(transport, query_timeout).await?;
            info!(device = transport.device(), %abi, "device ABI");
            device_abi = Some(abi.clone());
            abi
        };

        reporter.step(&format!("{}: running on {abi}", module.name));
        let verdict = match ModulePlan::new(module, &abi) {
            Ok(plan) => verdict_for(run_module(transport, &plan).await),
            Err(err) => ModuleVerdict::Failed {
                message: err.to_string(),
                outcome: None,
            },
        };
        report_verdict(reporter, &module.name, &verdict);
        reports.push(ModuleReport {
            module: module.name.clone(),
            abi,
            verdict,
        });
    }

    Ok(RunSummary::from_reports(reports))
}

fn verdict_for(result: Result<ModuleRun, ModuleError>) -> ModuleVerdict {
    match result {
        Ok(ModuleRun::Passed { binary, outcome }) => ModuleVerdict::Passed {
            binary: binary.to_string(),
            outcome,
        },
        Ok(ModuleRun::Bypassed(decision)) => ModuleVerdict::Bypassed { decision },
        Err(err) => {
            let outcome = match &err {
                ModuleError::CommandUnsuccessful { outcome, .. } => Some(outcome.clone()),
                _ => None,
            };
            ModuleVerdict::Failed {
                message: err.to_string(),
                outcome,
            }
        }
    }
}

fn report_verdict(reporter: &impl ProgressReporter, module: &str, verdict: &ModuleVerdict) {
    match verdict {
        ModuleVerdict::Passed { binary, .. } => {
            reporter.success(&format!("{module}: passed ({binary})"));
        }
        ModuleVerdict::Bypassed { .. } => {
            reporter.warn(&format!("{module}: bypassed (architecture mismatch)"));
        }
        ModuleVerdict::Failed { message, .. } => reporter.fail(&format!("{module}: {message}")),
    }
}
