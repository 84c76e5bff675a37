//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once in `Cli::run()`. Config is loaded lazily so
//! that offline commands (`version`, `gate`) work without a config file.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::KtestConfig;
use crate::infra::config::YamlConfigStore;
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Device selection flags.
pub struct DeviceFlags {
    /// adb serial overriding `device.serial`.
    pub serial: Option<String>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Device options.
    pub device: DeviceFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Config persistence.
    pub config_store: YamlConfigStore,
    serial: Option<String>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store: YamlConfigStore,
            serial: flags.device.serial.clone(),
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Human renderer over this context's output settings.
    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// `true` when a spinner may be drawn.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.is_json() && self.output.show_progress()
    }

    /// Load the stored config with command-line overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or is invalid.
    pub fn config(&self) -> Result<KtestConfig> {
        let mut config = self.config_store.load()?;
        if let Some(serial) = &self.serial {
            config.device.serial = Some(serial.clone());
        }
        Ok(config)
    }
}
