//! Device property queries.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::DeviceTransport;
use crate::application::services::executor;

/// System property holding the device's primary ABI.
pub const ABI_PROPERTY: &str = "ro.product.cpu.abi";

/// Read the device's primary ABI, e.g. `arm64-v8a`.
///
/// # Errors
///
/// Returns an error if the device is unreachable, `getprop` does not
/// succeed, or the property is empty.
pub async fn primary_abi(transport: &impl DeviceTransport, timeout: Duration) -> Result<String> {
    let outcome = executor::execute(transport, &format!("getprop {ABI_PROPERTY}"), timeout)
        .await
        .with_context(|| format!("reading {ABI_PROPERTY} from {}", transport.device()))?;
    anyhow::ensure!(
        outcome.is_success(),
        "reading {ABI_PROPERTY} from {} failed: {outcome}",
        transport.device()
    );
    let abi = outcome.stdout.trim();
    anyhow::ensure!(
        !abi.is_empty(),
        "{} reported an empty {ABI_PROPERTY}",
        transport.device()
    );
    Ok(abi.to_string())
}
