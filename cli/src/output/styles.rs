//! Terminal palette for ktest output.
//!
//! Every style starts out plain. `colorize` fills the palette in when the
//! terminal supports color and neither `--no-color` nor `NO_COLOR` is set.

use owo_colors::Style;

use crate::domain::{CommandStatus, RunDecision};

#[derive(Default, Clone)]
pub struct Styles {
    /// Passed modules and `SUCCESS` outcomes.
    pub success: Style,
    /// Bypassed modules, timeouts and empty results.
    pub warning: Style,
    /// Failed modules and transport errors.
    pub error: Style,
    /// Progress steps of a run.
    pub info: Style,
    /// Paths, captured stderr and other secondary text.
    pub dim: Style,
    pub bold: Style,
    /// Section titles such as `Results:`.
    pub header: Style,
}

impl Styles {
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().cyan();
    }

    /// Style for the label of a command outcome.
    #[must_use]
    pub fn status(&self, status: CommandStatus) -> Style {
        match status {
            CommandStatus::Success => self.success,
            CommandStatus::TimedOut => self.warning,
            CommandStatus::Failed | CommandStatus::Exception => self.error,
        }
    }

    /// Style for an architecture gate decision.
    #[must_use]
    pub fn decision(&self, decision: RunDecision) -> Style {
        match decision {
            RunDecision::Run => self.success,
            RunDecision::SkipModule | RunDecision::FullModuleBypass => self.warning,
        }
    }
}
