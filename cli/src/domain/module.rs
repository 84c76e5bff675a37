//! Module invocation metadata, run decisions and run reports.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::outcome::CommandOutcome;

/// Per-module metadata handed to the architecture gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInvocation {
    pub module_name: String,
    /// Device ABI, e.g. `arm64-v8a`.
    pub module_abi: String,
    /// Architecture the module is restricted to, e.g. `arm64`. `None` means any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_arch: Option<String>,
}

impl ModuleInvocation {
    #[must_use]
    pub fn new(
        module_name: impl Into<String>,
        module_abi: impl Into<String>,
        declared_arch: Option<String>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            module_abi: module_abi.into(),
            declared_arch,
        }
    }
}

/// Terminal outcome of the architecture gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunDecision {
    Run,
    /// Exclude individual tests. Not produced by the architecture gate.
    SkipModule,
    /// Exclude the whole module from the run plan.
    FullModuleBypass,
}

/// How one module run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ModuleVerdict {
    Passed {
        binary: String,
        outcome: CommandOutcome,
    },
    Failed {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<CommandOutcome>,
    },
    /// Excluded by the gate; neither a pass nor a failure.
    Bypassed { decision: RunDecision },
}

/// Report for one module in a run plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub module: String,
    pub abi: String,
    #[serde(flatten)]
    pub verdict: ModuleVerdict,
}

impl ModuleReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self.verdict, ModuleVerdict::Passed { .. })
    }

    #[must_use]
    pub fn failed(&self) -> bool {
        matches!(self.verdict, ModuleVerdict::Failed { .. })
    }

    #[must_use]
    pub fn bypassed(&self) -> bool {
        matches!(self.verdict, ModuleVerdict::Bypassed { .. })
    }
}

/// Aggregate result of running a set of modules.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub modules: Vec<ModuleReport>,
    pub passed: usize,
    pub failed: usize,
    pub bypassed: usize,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    #[must_use]
    pub fn from_reports(modules: Vec<ModuleReport>) -> Self {
        let passed = modules.iter().filter(|m| m.passed()).count();
        let failed = modules.iter().filter(|m| m.failed()).count();
        let bypassed = modules.iter().filter(|m| m.bypassed()).count();
        Self {
            modules,
            passed,
            failed,
            bypassed,
            finished_at: Utc::now(),
        }
    }

    /// `true` when no module failed. Bypassed modules do not count.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
