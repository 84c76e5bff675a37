//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod arch;
pub mod config;
pub mod error;
pub mod module;
pub mod outcome;
pub mod path;

pub use arch::{Arch, evaluate};
pub use config::{KtestConfig, ModuleConfig, ResolvedModule, validate_config};
pub use error::{
    CommandTimedOut, ConfigError, FindError, InputError, ModuleError, TransportError,
    UnknownArch,
};
pub use module::{ModuleInvocation, ModuleReport, ModuleVerdict, RunDecision, RunSummary};
pub use outcome::{CommandOutcome, CommandStatus};
pub use path::{RemotePath, SearchSpec, shell_quote};
