//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::domain::config::CONFIG_ENV;
use crate::domain::{
    CommandOutcome, CommandStatus, KtestConfig, ModuleInvocation, ModuleReport, ModuleVerdict,
    RemotePath, RunDecision, RunSummary,
};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
///
/// Data lines (found paths, command output) are printed even when `quiet`;
/// only decoration is suppressed.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the result of a binary search.
    pub fn render_located(&self, root: &RemotePath, name: &str, found: Option<&RemotePath>) {
        match found {
            Some(path) => println!("{path}"),
            None => self
                .ctx
                .warn(&format!("no file named '{name}' under {root}")),
        }
    }

    /// Render `find` matches, one per line.
    pub fn render_paths(&self, paths: &[RemotePath]) {
        if paths.is_empty() {
            self.ctx.warn("no matches");
            return;
        }
        for path in paths {
            println!("{path}");
        }
    }

    /// Render a single command outcome: a status line, then the captured streams.
    pub fn render_outcome(&self, outcome: &CommandOutcome) {
        let status = status_label(outcome);
        if outcome.is_success() {
            self.ctx.success(&status);
        } else {
            self.ctx.error(&status);
        }
        if !outcome.stdout.is_empty() {
            print!("{}", with_newline(&outcome.stdout));
        }
        if !outcome.stderr.is_empty() {
            eprint!(
                "{}",
                with_newline(&outcome.stderr).style(self.ctx.styles.dim)
            );
        }
    }

    /// Render an architecture gate decision.
    pub fn render_decision(&self, invocation: &ModuleInvocation, decision: RunDecision) {
        if !self.ctx.quiet {
            self.ctx.kv("abi:", &invocation.module_abi);
            self.ctx.kv(
                "arch:",
                invocation.declared_arch.as_deref().unwrap_or("(any)"),
            );
        }
        println!(
            "{}",
            decision_label(decision).style(self.ctx.styles.decision(decision))
        );
    }

    /// Render the per-module table and totals of a run.
    pub fn render_summary(&self, summary: &RunSummary) {
        if !self.ctx.quiet {
            println!();
            self.ctx.header("Results:");
        }
        for report in &summary.modules {
            self.render_report(report);
        }
        if self.ctx.quiet {
            return;
        }
        println!();
        let totals = format!(
            "{} passed, {} failed, {} bypassed",
            summary.passed, summary.failed, summary.bypassed
        );
        if summary.is_success() {
            self.ctx.success(&totals);
        } else {
            self.ctx.error(&totals);
        }
        self.ctx.kv(
            "finished:",
            &summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
    }

    fn render_report(&self, report: &ModuleReport) {
        let name = format!("{:<28} {:<12}", report.module, report.abi);
        match &report.verdict {
            ModuleVerdict::Passed { binary, .. } => {
                println!(
                    "  {} {name} {}",
                    "✓".style(self.ctx.styles.success),
                    binary.style(self.ctx.styles.dim)
                );
            }
            ModuleVerdict::Bypassed { decision } => {
                println!(
                    "  {} {name} {}",
                    "-".style(self.ctx.styles.dim),
                    decision_label(*decision).style(self.ctx.styles.dim)
                );
            }
            ModuleVerdict::Failed { message, outcome } => {
                let first = message.lines().next().unwrap_or_default();
                let mark = outcome
                    .as_ref()
                    .map_or(self.ctx.styles.error, |o| self.ctx.styles.status(o.status));
                println!("  {} {name} {first}", "✗".style(mark));
            }
        }
    }

    /// Render the current ktest configuration.
    pub fn render_config(&self, config: &KtestConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!(
            "  {:<28} {}",
            "device.serial:",
            config.device.serial.as_deref().unwrap_or("(adb default)")
        );
        println!("  {:<28} {}", "device.adb_path:", config.device.adb_path);
        println!(
            "  {:<28} {}",
            "device.query_timeout_secs:", config.device.query_timeout_secs
        );
        println!("  {:<28} {}", "discovery.root:", config.discovery.root);
        println!("  {:<28} {}", "discovery.binary:", config.discovery.binary);
        println!(
            "  {:<28} {}",
            "execution.timeout_secs:", config.execution.timeout_secs
        );
        println!();
        println!("  {}", "Modules:".style(self.ctx.styles.bold));
        for module in &config.modules {
            let arch = module.arch.as_deref().unwrap_or("any");
            println!("    {:<26} arch={arch}", module.name);
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, "ANDROID_SERIAL", "KTEST_LOG", "NO_COLOR"] {
            println!(
                "    {:<26} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
    }
}

/// `SUCCESS`, or e.g. `FAILED (exit code 2)`.
#[must_use]
pub fn status_label(outcome: &CommandOutcome) -> String {
    match (outcome.status, outcome.exit_code) {
        (CommandStatus::Success, _) | (_, None) => outcome.status.to_string(),
        (status, Some(code)) => format!("{status} (exit code {code})"),
    }
}

/// Wire name of a gate decision, e.g. `FULL_MODULE_BYPASS`.
#[must_use]
pub fn decision_label(decision: RunDecision) -> &'static str {
    match decision {
        RunDecision::Run => "RUN",
        RunDecision::SkipModule => "SKIP_MODULE",
        RunDecision::FullModuleBypass => "FULL_MODULE_BYPASS",
    }
}

fn with_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}
