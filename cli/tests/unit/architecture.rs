//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries
//! (domain → application → infra / output / commands) are kept.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(") && trimmed.contains("test") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-test, non-comment lines of every file under `src/<layer>`, with
/// their display path and line number.
fn production_lines(layer: &str) -> Vec<(String, usize, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer);
    let mut out = Vec::new();
    for file in collect_rs_files(&root) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") || trimmed.is_empty() {
                continue;
            }
            out.push((rel.clone(), i + 1, line.to_string()));
        }
    }
    out
}

fn forbid(layer: &str, needles: &[&str]) -> Vec<String> {
    production_lines(layer)
        .into_iter()
        .filter(|(_, _, line)| needles.iter().any(|n| line.contains(n)))
        .map(|(rel, lineno, line)| format!("{rel}:{lineno}: {line}"))
        .collect()
}

#[test]
fn domain_is_pure() {
    let violations = forbid(
        "domain",
        &[
            "crate::application",
            "crate::infra",
            "crate::commands",
            "crate::output",
            "tokio::",
            "std::process",
            "std::fs",
            "std::net",
        ],
    );
    assert!(
        violations.is_empty(),
        "domain/ must stay free of I/O and outer layers:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_has_no_imports_from_outer_layers() {
    let violations = forbid(
        "application",
        &["crate::infra", "crate::commands", "crate::output"],
    );
    assert!(
        violations.is_empty(),
        "application/ must only depend on domain/ and its own ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = forbid("infra", &["crate::commands", "crate::output"]);
    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_and_services_have_no_print_macros() {
    let mut violations = forbid("infra", &["println!", "eprintln!"]);
    violations.extend(forbid("application", &["println!", "eprintln!"]));
    assert!(
        violations.is_empty(),
        "infra/ and application/ report through tracing or ProgressReporter:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_tokio_command_runner_new_outside_infra() {
    let violations: Vec<String> = ["application", "commands", "output", "domain"]
        .iter()
        .flat_map(|layer| forbid(layer, &["TokioCommandRunner::new"]))
        .collect();
    assert!(
        violations.is_empty(),
        "TokioCommandRunner::new outside infra/; build transports with AdbTransport::from_config:\n{}",
        violations.join("\n")
    );
}

#[test]
fn services_take_trait_bounds_not_adapters() {
    let violations: Vec<String> = production_lines("application")
        .into_iter()
        .filter(|(_, _, line)| {
            line.contains("fn ")
                && (line.contains("AdbTransport") || line.contains("TokioCommandRunner"))
        })
        .map(|(rel, lineno, line)| format!("{rel}:{lineno}: {line}"))
        .collect();
    assert!(
        violations.is_empty(),
        "concrete adapter types in service signatures; use `impl DeviceTransport`:\n{}",
        violations.join("\n")
    );
}

#[test]
fn command_handlers_accept_app_context() {
    let violations: Vec<String> = production_lines("commands")
        .into_iter()
        .filter(|(_, _, line)| {
            (line.contains("pub fn run(") || line.contains("pub async fn run("))
                && !line.contains("app: &AppContext")
        })
        .map(|(rel, lineno, line)| format!("{rel}:{lineno}: {line}"))
        .collect();
    assert!(
        violations.is_empty(),
        "command handlers must take `app: &AppContext` first:\n{}",
        violations.join("\n")
    );
}
