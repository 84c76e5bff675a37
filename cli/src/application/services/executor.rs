//! Remote executor: run one shell command on the device under a deadline.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use tracing::{debug, warn};

use crate::application::ports::DeviceTransport;
use crate::domain::{CommandOutcome, TransportError};

/// Execute `command` once, bounded by `timeout`.
///
/// - the transport's outcome is returned verbatim when it answers in time
/// - `TIMED_OUT` when `timeout` elapses first; the in-flight request is
///   dropped and not tracked further
/// - `EXCEPTION` when the command cannot be issued (zero timeout, blank
///   command, transport invocation failure)
///
/// Never retries.
///
/// # Errors
///
/// Returns [`TransportError::ConnectivityLost`] when the device goes away.
pub async fn execute(
    transport: &impl DeviceTransport,
    command: &str,
    timeout: Duration,
) -> Result<CommandOutcome, TransportError> {
    if timeout.is_zero() {
        return Ok(CommandOutcome::exception("timeout must be positive"));
    }
    if command.trim().is_empty() {
        return Ok(CommandOutcome::exception("command must not be empty"));
    }

    debug!(device = transport.device(), command, ?timeout, "executing");
    let outcome = match tokio::time::timeout(timeout, transport.execute_shell(command, Some(timeout)))
        .await
    {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(TransportError::Invocation(reason))) => {
            warn!(command, %reason, "command could not be issued");
            CommandOutcome::exception(reason)
        }
        Ok(Err(lost)) => return Err(lost),
        Err(_elapsed) => {
            warn!(command, ?timeout, "command timed out");
            CommandOutcome::timed_out("", format!("no result within {timeout:?}"))
        }
    };

    debug!(command, status = %outcome.status, exit_code = ?outcome.exit_code, "finished");
    Ok(outcome)
}
