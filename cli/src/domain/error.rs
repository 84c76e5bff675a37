//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::outcome::CommandOutcome;

// ── Transport errors ──────────────────────────────────────────────────────────

/// Failures reported by a device transport.
///
/// `ConnectivityLost` is never retried or swallowed: a half-finished query
/// against a vanished device cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("lost connection to device {device}: {reason}")]
    ConnectivityLost { device: String, reason: String },

    #[error("transport invocation failed: {0}")]
    Invocation(String),
}

impl TransportError {
    /// Returns `true` for a lost device connection.
    #[must_use]
    pub fn is_connectivity_lost(&self) -> bool {
        matches!(self, Self::ConnectivityLost { .. })
    }
}

// ── Input errors ──────────────────────────────────────────────────────────────

/// Rejected values for remote paths and search patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("remote path must not be empty")]
    EmptyPath,

    #[error("file name to search for must not be empty")]
    EmptyName,
}

// ── Module errors ─────────────────────────────────────────────────────────────

/// Reasons a single module run failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    #[error("no binary named '{name}' found under {root}")]
    BinaryNotFound { root: String, name: String },

    #[error("{command} did not succeed: {outcome}")]
    CommandUnsuccessful {
        command: String,
        outcome: CommandOutcome,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

// ── Find errors ───────────────────────────────────────────────────────────────

/// Errors from the strict `find` helper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FindError {
    #[error("find under {path} did not succeed: {outcome}")]
    CommandUnsuccessful {
        path: String,
        outcome: CommandOutcome,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration keys, values and module entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },

    #[error("Invalid module '{module}': {reason}")]
    InvalidModule { module: String, reason: String },

    #[error("Module '{0}' is not configured")]
    UnknownModule(String),
}

// ── Architecture errors ───────────────────────────────────────────────────────

/// An architecture token outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown architecture '{token}' (expected one of: {valid})")]
pub struct UnknownArch {
    pub token: String,
    pub valid: String,
}

// ── Process errors ────────────────────────────────────────────────────────────

/// A local process exceeded its wall-clock budget and was killed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{program} timed out after {timeout:?}")]
pub struct CommandTimedOut {
    pub program: String,
    pub timeout: std::time::Duration,
}
