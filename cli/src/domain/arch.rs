//! Architecture applicability gate.
//!
//! Decides, before any discovery or execution, whether a module's declared
//! target architecture matches the device. Stateless and pure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::UnknownArch;
use crate::domain::module::{ModuleInvocation, RunDecision};

/// CPU architecture families a module may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    Arm,
    Arm64,
    X86,
    X86_64,
}

/// Recognized `declared_arch` tokens.
pub const ARCH_TOKENS: &[(&str, Arch)] = &[
    ("arm", Arch::Arm),
    ("arm64", Arch::Arm64),
    ("x86", Arch::X86),
    ("x86_64", Arch::X86_64),
];

/// Android ABI names and the architecture family each one belongs to.
pub const ABI_TABLE: &[(&str, Arch)] = &[
    ("armeabi", Arch::Arm),
    ("armeabi-v7a", Arch::Arm),
    ("arm64-v8a", Arch::Arm64),
    ("x86", Arch::X86),
    ("x86_64", Arch::X86_64),
];

impl Arch {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        ARCH_TOKENS
            .iter()
            .find(|(_, arch)| *arch == self)
            .map_or("unknown", |(token, _)| token)
    }

    /// Architecture family encoded by an ABI string, e.g. `arm64-v8a` → `Arm64`.
    #[must_use]
    pub fn from_abi(abi: &str) -> Option<Self> {
        ABI_TABLE
            .iter()
            .find(|(name, _)| *name == abi)
            .map(|(_, arch)| *arch)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = UnknownArch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ARCH_TOKENS
            .iter()
            .find(|(token, _)| *token == s)
            .map(|(_, arch)| *arch)
            .ok_or_else(|| UnknownArch {
                token: s.to_string(),
                valid: valid_arch_tokens(),
            })
    }
}

/// Comma-separated list of recognized architecture tokens.
#[must_use]
pub fn valid_arch_tokens() -> String {
    ARCH_TOKENS
        .iter()
        .map(|(token, _)| *token)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Evaluate the gate for one module invocation.
///
/// - no declared arch → `Run`
/// - device arch (from the ABI) equals the declared arch → `Run`
/// - anything else, including an unrecognized ABI or arch token →
///   `FullModuleBypass`
///
/// Never returns `SkipModule`.
#[must_use]
pub fn evaluate(invocation: &ModuleInvocation) -> RunDecision {
    let Some(declared) = invocation.declared_arch.as_deref() else {
        return RunDecision::Run;
    };
    let device = Arch::from_abi(&invocation.module_abi);
    match (device, declared.parse::<Arch>()) {
        (Some(device), Ok(declared)) if device == declared => RunDecision::Run,
        _ => RunDecision::FullModuleBypass,
    }
}
