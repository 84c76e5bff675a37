//! Property-based tests for the locator, the architecture gate and `find`
//! output parsing.

use std::collections::BTreeMap;

use proptest::prelude::*;

use ktest_cli::application::services::file_finder::parse_find_output;
use ktest_cli::application::services::locator::locate;
use ktest_cli::domain::arch::Arch;
use ktest_cli::domain::config::{VALID_CONFIG_KEYS, validate_config_key};
use ktest_cli::domain::{ModuleInvocation, RunDecision, SearchSpec, evaluate, shell_quote};

use crate::helpers::remote;
use crate::mocks::FakeAdb;

const ABIS: &[&str] = &["armeabi", "armeabi-v7a", "arm64-v8a", "x86", "x86_64"];
const ARCHES: &[&str] = &["arm", "arm64", "x86", "x86_64"];

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(fut)
}

/// A random two-level tree: `/r/<dir>/<file>` plus files directly under `/r`.
fn tree() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(
        "[a-z]{1,4}",
        prop::collection::vec("[a-z]{1,4}\\.txt", 0..4),
        0..5,
    )
}

fn as_strs(items: &[String]) -> Vec<&str> {
    items.iter().map(String::as_str).collect()
}

// ============================================================================
// Locator
// ============================================================================

proptest! {
    /// A uniquely named file anywhere in the tree is found at its exact path.
    #[test]
    fn prop_unique_file_is_found(dirs in tree(), pick in 0usize..5) {
        let names: Vec<String> = dirs.keys().cloned().collect();
        // The target lands in the picked subdirectory, or in the root when
        // `pick` is out of range.
        let (target_dir, mut children) = match names.get(pick) {
            Some(dir) => (format!("/r/{dir}"), dirs[dir].clone()),
            None => ("/r".to_string(), names.clone()),
        };
        children.push("target.bin".to_string());

        let mut device = FakeAdb::new("arm64-v8a").dir("/r", &as_strs(&names));
        for (dir, files) in &dirs {
            device = device.dir(&format!("/r/{dir}"), &as_strs(files));
        }
        let device = device.dir(&target_dir, &as_strs(&children)).transport();

        let spec = SearchSpec::new(remote("/r"), "target.bin").expect("spec");
        let found = block_on(locate(&device, &spec)).expect("no transport errors");

        prop_assert_eq!(
            found.map(|p| p.to_string()),
            Some(format!("{target_dir}/target.bin"))
        );
    }

    /// A name that appears nowhere is never found, and only directories are listed.
    #[test]
    fn prop_absent_file_is_not_found(dirs in tree()) {
        let names: Vec<String> = dirs.keys().cloned().collect();
        let mut device = FakeAdb::new("arm64-v8a").dir("/r", &as_strs(&names));
        for (dir, files) in &dirs {
            device = device.dir(&format!("/r/{dir}"), &as_strs(files));
        }
        let device = device.transport();

        let spec = SearchSpec::new(remote("/r"), "absent.bin").expect("spec");
        let found = block_on(locate(&device, &spec)).expect("no transport errors");

        prop_assert!(found.is_none());
        prop_assert_eq!(device.runner().listed().len(), dirs.len() + 1);
    }
}

// ============================================================================
// Architecture gate
// ============================================================================

proptest! {
    /// Without a declared arch every module runs, whatever the ABI.
    #[test]
    fn prop_undeclared_arch_always_runs(abi in "[a-z0-9_-]{0,12}") {
        let decision = evaluate(&ModuleInvocation::new("m", abi, None));
        prop_assert_eq!(decision, RunDecision::Run);
    }

    /// A declared arch runs exactly when it is the ABI's architecture.
    #[test]
    fn prop_declared_arch_matches_table(
        abi_ix in 0usize..ABIS.len(),
        arch_ix in 0usize..ARCHES.len(),
    ) {
        let abi = ABIS[abi_ix];
        let arch = ARCHES[arch_ix];
        let expected = if Arch::from_abi(abi).map(Arch::as_str) == Some(arch) {
            RunDecision::Run
        } else {
            RunDecision::FullModuleBypass
        };

        let decision = evaluate(&ModuleInvocation::new("m", abi, Some(arch.to_string())));

        prop_assert_eq!(decision, expected);
    }

    /// The gate never yields `SkipModule`.
    #[test]
    fn prop_gate_never_skips(
        abi in "[a-z0-9_-]{0,12}",
        arch in proptest::option::of("[a-z0-9_]{0,8}"),
    ) {
        let decision = evaluate(&ModuleInvocation::new("m", abi, arch));
        prop_assert_ne!(decision, RunDecision::SkipModule);
    }
}

// ============================================================================
// find output parsing and quoting
// ============================================================================

proptest! {
    /// Every non-blank line becomes one path, in order.
    #[test]
    fn prop_find_output_keeps_lines_in_order(
        lines in prop::collection::vec("/[a-z/]{1,20}", 0..10),
        crlf in proptest::bool::ANY,
    ) {
        let sep = if crlf { "\r\n" } else { "\n" };
        let stdout: String = lines.iter().map(|l| format!("{l}{sep}")).collect();

        let parsed: Vec<String> = parse_find_output(&stdout)
            .iter()
            .map(ToString::to_string)
            .collect();

        prop_assert_eq!(parsed, lines);
    }

    /// Quoted words are a single shell word with no unescaped quote inside.
    #[test]
    fn prop_shell_quote_wraps_in_single_quotes(s in ".{0,30}") {
        let quoted = shell_quote(&s);
        prop_assert!(quoted.starts_with('\''));
        prop_assert!(quoted.ends_with('\''));
        let inner = &quoted[1..quoted.len() - 1];
        prop_assert_eq!(inner.split("'\\''").collect::<Vec<_>>().join("'"), s);
    }

    /// Arbitrary keys outside the whitelist are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,20}\\.[a-z]{1,20}") {
        prop_assume!(!VALID_CONFIG_KEYS.contains(&key.as_str()));
        prop_assert!(validate_config_key(&key).is_err());
    }
}
