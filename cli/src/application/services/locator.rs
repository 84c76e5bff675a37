//! Artifact locator: find a named file anywhere below a remote root.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use tracing::{debug, info};

use crate::application::ports::DeviceTransport;
use crate::domain::{RemotePath, SearchSpec, TransportError};

/// Depth-first search for the file described by `spec`.
///
/// Directories are listed and descended in the order the device reports
/// their entries; anything not reported as a directory is only a leaf
/// candidate and is never listed. The first match wins, so when several
/// files share the name the result depends on listing order. Symlink loops
/// are not detected.
///
/// Returns `Ok(None)` when nothing below the root matches. A directory the
/// device cannot list contributes no children and the walk moves on.
///
/// # Errors
///
/// A transport error (a lost device above all) aborts the walk immediately:
/// a partial walk cannot tell "absent" from "not reached".
pub async fn locate(
    transport: &impl DeviceTransport,
    spec: &SearchSpec,
) -> Result<Option<RemotePath>, TransportError> {
    let mut pending = vec![spec.root().clone()];

    while let Some(node) = pending.pop() {
        if transport.is_directory(&node).await? {
            let children = transport.list_children(&node).await?;
            debug!(dir = %node, entries = children.len(), "descending");
            // Reversed so the first listed child is popped first.
            pending.extend(children.into_iter().rev());
        } else if spec.matches(&node) {
            info!(path = %node, device = transport.device(), "artifact found");
            return Ok(Some(node));
        }
    }

    debug!(root = %spec.root(), name = spec.name(), "artifact not found");
    Ok(None)
}
