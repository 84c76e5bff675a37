//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
/// - `fail()` prints `"  ✗ {message}"` to stderr (never suppressed)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.info));
        }
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "!".style(self.ctx.styles.warning));
        }
    }

    fn fail(&self, message: &str) {
        self.ctx.error(message);
    }
}

/// Reporter that drops every event. Used for `--json` runs, where the
/// summary document is the only output.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn fail(&self, _message: &str) {}
}
