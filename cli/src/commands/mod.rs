//! Command implementations

pub mod config;
pub mod exec;
pub mod find;
pub mod gate;
pub mod locate;
pub mod run;
pub mod version;

use std::time::Duration;

use crate::domain::KtestConfig;

/// `--timeout` when given, else `execution.timeout_secs`.
#[must_use]
pub(crate) fn execution_timeout(config: &KtestConfig, flag: Option<u64>) -> Duration {
    Duration::from_secs(flag.unwrap_or(config.execution.timeout_secs))
}
