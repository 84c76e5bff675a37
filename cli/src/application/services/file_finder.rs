//! General file query helper built on the device's `find` command.
//!
//! Unlike the locator this issues one remote command instead of walking the
//! tree locally, and supports glob patterns plus extra `find` options.

use std::time::Duration;

use tracing::{debug, warn};

use crate::application::ports::DeviceTransport;
use crate::application::services::executor;
use crate::domain::{FindError, RemotePath, TransportError, shell_quote};

/// Build `find <path> -name <pattern> [options...]`.
///
/// `path` and `pattern` are quoted; `options` are passed through verbatim
/// as shell fragments (e.g. `-type f`, `-maxdepth 2`).
#[must_use]
pub fn find_command(path: &RemotePath, name_pattern: &str, options: &[String]) -> String {
    let mut command = format!(
        "find {} -name {}",
        shell_quote(path.as_str()),
        shell_quote(name_pattern)
    );
    for option in options {
        command.push(' ');
        command.push_str(option);
    }
    command
}

/// Split `find` output into paths, one per line, skipping blank lines.
#[must_use]
pub fn parse_find_output(stdout: &str) -> Vec<RemotePath> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| RemotePath::new(line).ok())
        .collect()
}

/// Run `find` and return the matched paths in output order.
///
/// # Errors
///
/// Returns [`FindError::CommandUnsuccessful`] when the command does not
/// report success, and [`FindError::Transport`] when the device is lost.
pub async fn try_find_files(
    transport: &impl DeviceTransport,
    path: &RemotePath,
    name_pattern: &str,
    options: &[String],
    timeout: Duration,
) -> Result<Vec<RemotePath>, FindError> {
    let command = find_command(path, name_pattern, options);
    let outcome = executor::execute(transport, &command, timeout).await?;
    if !outcome.is_success() {
        return Err(FindError::CommandUnsuccessful {
            path: path.to_string(),
            outcome,
        });
    }
    let found = parse_find_output(&outcome.stdout);
    debug!(path = %path, pattern = name_pattern, matches = found.len(), "find finished");
    Ok(found)
}

/// Lenient variant of [`try_find_files`]: a failed `find` is logged and
/// reported as no matches, so "failed" and "found nothing" look the same.
///
/// # Errors
///
/// Only a lost device connection is returned as an error.
pub async fn find_files(
    transport: &impl DeviceTransport,
    path: &RemotePath,
    name_pattern: &str,
    options: &[String],
    timeout: Duration,
) -> Result<Vec<RemotePath>, TransportError> {
    match try_find_files(transport, path, name_pattern, options, timeout).await {
        Ok(found) => Ok(found),
        Err(FindError::CommandUnsuccessful { outcome, .. }) => {
            warn!(
                path = %path,
                pattern = name_pattern,
                status = %outcome.status,
                stderr = outcome.stderr.trim(),
                "find failed; treating as no matches"
            );
            Ok(Vec::new())
        }
        Err(FindError::Transport(err)) => Err(err),
    }
}
