//! Domain types and validators for ktest configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::arch::{Arch, valid_arch_tokens};
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Well-known directory the kernel net test binary is pushed under.
pub const DEFAULT_DISCOVERY_ROOT: &str = "/data/local/tmp/kernel_net_tests";
/// File name of the kernel net test binary.
pub const DEFAULT_BINARY_NAME: &str = "kernel_net_tests";
/// Module configured when the config file names none.
pub const DEFAULT_MODULE_NAME: &str = "vts_kernel_net_tests";

const DEFAULT_ADB_PATH: &str = "adb";
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;
const DEFAULT_EXEC_TIMEOUT_SECS: u64 = 1800;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "KTEST_CONFIG";

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "device.serial",
    "device.adb_path",
    "device.query_timeout_secs",
    "discovery.root",
    "discovery.binary",
    "execution.timeout_secs",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.ktest/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KtestConfig {
    pub device: DeviceConfig,
    pub discovery: DiscoveryConfig,
    pub execution: ExecutionConfig,
    pub modules: Vec<ModuleConfig>,
}

impl Default for KtestConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            discovery: DiscoveryConfig::default(),
            execution: ExecutionConfig::default(),
            modules: vec![ModuleConfig::named(DEFAULT_MODULE_NAME)],
        }
    }
}

/// How to reach the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// adb serial; `None` lets adb pick the only attached device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    pub adb_path: String,
    /// Budget for directory queries and property lookups.
    pub query_timeout_secs: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            serial: None,
            adb_path: DEFAULT_ADB_PATH.to_string(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }
}

/// Where test binaries live on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub root: String,
    pub binary: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_DISCOVERY_ROOT.to_string(),
            binary: DEFAULT_BINARY_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub timeout_secs: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_EXEC_TIMEOUT_SECS,
        }
    }
}

/// One test module. Unset fields fall back to the `discovery` / `execution`
/// sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub name: String,
    /// Restrict the module to one architecture (`arm`, `arm64`, `x86`, `x86_64`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    /// Device ABI override; queried from the device when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ModuleConfig {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arch: None,
            abi: None,
            root: None,
            binary: None,
            args: Vec::new(),
            timeout_secs: None,
        }
    }
}

/// A module with every fallback applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub name: String,
    pub arch: Option<String>,
    pub abi: Option<String>,
    pub root: String,
    pub binary: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl KtestConfig {
    /// Apply section defaults to a module entry.
    #[must_use]
    pub fn resolve(&self, module: &ModuleConfig) -> ResolvedModule {
        ResolvedModule {
            name: module.name.clone(),
            arch: module.arch.clone(),
            abi: module.abi.clone(),
            root: module
                .root
                .clone()
                .unwrap_or_else(|| self.discovery.root.clone()),
            binary: module
                .binary
                .clone()
                .unwrap_or_else(|| self.discovery.binary.clone()),
            args: module.args.clone(),
            timeout: Duration::from_secs(
                module.timeout_secs.unwrap_or(self.execution.timeout_secs),
            ),
        }
    }

    /// Resolve the named modules, or all of them when `names` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModule`] for a name not in the config.
    pub fn select_modules(&self, names: &[String]) -> Result<Vec<ResolvedModule>, ConfigError> {
        if names.is_empty() {
            return Ok(self.modules.iter().map(|m| self.resolve(m)).collect());
        }
        names
            .iter()
            .map(|name| {
                self.modules
                    .iter()
                    .find(|m| &m.name == name)
                    .map(|m| self.resolve(m))
                    .ok_or_else(|| ConfigError::UnknownModule(name.clone()))
            })
            .collect()
    }

    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.device.query_timeout_secs)
    }

    /// Set one whitelisted scalar key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "device.serial" => self.device.serial = Some(value.to_string()),
            "device.adb_path" => self.device.adb_path = value.to_string(),
            "device.query_timeout_secs" => {
                self.device.query_timeout_secs = parse_timeout(key, value)?;
            }
            "discovery.root" => self.discovery.root = value.to_string(),
            "discovery.binary" => self.discovery.binary = value.to_string(),
            "execution.timeout_secs" => self.execution.timeout_secs = parse_timeout(key, value)?,
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                    valid: VALID_CONFIG_KEYS.join(", "),
                });
            }
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<(), ConfigError> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        });
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |valid: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    };
    match key {
        "device.query_timeout_secs" | "execution.timeout_secs" => {
            parse_timeout(key, value).map(|_| ())
        }
        "discovery.root" if !value.starts_with('/') => Err(invalid("an absolute device path")),
        _ if value.trim().is_empty() => Err(invalid("a non-empty string")),
        _ => Ok(()),
    }
}

fn parse_timeout(key: &str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: "a positive number of seconds".to_string(),
        }),
    }
}

/// Validates a whole configuration, including every module entry.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_config(config: &KtestConfig) -> Result<(), ConfigError> {
    validate_config_value("device.adb_path", &config.device.adb_path)?;
    validate_config_value(
        "device.query_timeout_secs",
        &config.device.query_timeout_secs.to_string(),
    )?;
    validate_config_value("discovery.root", &config.discovery.root)?;
    validate_config_value("discovery.binary", &config.discovery.binary)?;
    validate_config_value(
        "execution.timeout_secs",
        &config.execution.timeout_secs.to_string(),
    )?;

    let mut seen = HashSet::new();
    for module in &config.modules {
        validate_module(module)?;
        if !seen.insert(module.name.as_str()) {
            return Err(module_error(module, "duplicate module name"));
        }
    }
    Ok(())
}

fn validate_module(module: &ModuleConfig) -> Result<(), ConfigError> {
    if module.name.trim().is_empty() {
        return Err(module_error(module, "name must not be empty"));
    }
    if let Some(arch) = &module.arch {
        if arch.parse::<Arch>().is_err() {
            return Err(module_error(
                module,
                &format!("unknown arch '{arch}' (valid: {})", valid_arch_tokens()),
            ));
        }
    }
    if module.abi.as_deref().is_some_and(|abi| abi.trim().is_empty()) {
        return Err(module_error(module, "abi must not be empty"));
    }
    if module.root.as_deref().is_some_and(|root| !root.starts_with('/')) {
        return Err(module_error(module, "root must be an absolute device path"));
    }
    if module.binary.as_deref().is_some_and(|b| b.trim().is_empty()) {
        return Err(module_error(module, "binary must not be empty"));
    }
    if module.timeout_secs == Some(0) {
        return Err(module_error(module, "timeout_secs must be positive"));
    }
    Ok(())
}

fn module_error(module: &ModuleConfig, reason: &str) -> ConfigError {
    ConfigError::InvalidModule {
        module: module.name.clone(),
        reason: reason.to_string(),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
