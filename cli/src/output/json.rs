//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed document on stdout:
//! the command's result on success, or the error object below on failure.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{ConfigError, FindError, InputError, TransportError};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}

/// Stable error code for the JSON error object.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(err) = err.downcast_ref::<TransportError>() {
        return transport_code(err);
    }
    if let Some(err) = err.downcast_ref::<FindError>() {
        return match err {
            FindError::Transport(err) => transport_code(err),
            FindError::CommandUnsuccessful { .. } => "FIND_FAILED",
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "CONFIG";
    }
    if err.downcast_ref::<InputError>().is_some() {
        return "INVALID_INPUT";
    }
    "ERROR"
}

fn transport_code(err: &TransportError) -> &'static str {
    match err {
        TransportError::ConnectivityLost { .. } => "CONNECTIVITY_LOST",
        TransportError::Invocation(_) => "TRANSPORT",
    }
}
