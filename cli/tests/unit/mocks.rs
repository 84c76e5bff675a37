//! Fake `adb` for driving `AdbTransport` through its real command protocol.
//!
//! This is the single device double of the unit harness: every service is
//! exercised through `AdbTransport<FakeAdb>`, so quoting, exit-code mapping
//! and disconnect detection are always in the loop.

use std::collections::BTreeMap;
use std::process::Output;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use ktest_cli::application::ports::CommandRunner;
use ktest_cli::infra::adb::AdbTransport;

use crate::helpers::{err_output, exit_status, ok_output};

pub const SERIAL: &str = "R58M123";
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Canned answer for shell commands starting with `prefix`.
struct Reply {
    prefix: String,
    code: i32,
    stdout: String,
    stderr: String,
}

/// Answers `adb [-s SERIAL] shell <command>` like a device would.
///
/// Understands `test -d`, `ls -1 -A` and `getprop`. Any other command is
/// matched against the registered replies and otherwise treated as running
/// a program that exits with `program_exit`.
pub struct FakeAdb {
    dirs: BTreeMap<String, Vec<String>>,
    unreadable: Vec<String>,
    replies: Vec<Reply>,
    abi: String,
    program_exit: i32,
    program_stdout: String,
    shell_delay: Option<Duration>,
    offline_after: Option<usize>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeAdb {
    pub fn new(abi: &str) -> Self {
        Self {
            dirs: BTreeMap::new(),
            unreadable: Vec::new(),
            replies: Vec::new(),
            abi: abi.to_string(),
            program_exit: 0,
            program_stdout: String::new(),
            shell_delay: None,
            offline_after: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Declare a directory and its children, in listing order.
    pub fn dir(mut self, path: &str, children: &[&str]) -> Self {
        self.dirs.insert(
            path.to_string(),
            children.iter().map(|c| (*c).to_string()).collect(),
        );
        self
    }

    /// Declare a directory that exists but cannot be listed.
    pub fn unreadable(mut self, path: &str) -> Self {
        self.unreadable.push(path.to_string());
        self
    }

    /// Answer commands starting with `prefix`.
    pub fn reply(mut self, prefix: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.replies.push(Reply {
            prefix: prefix.to_string(),
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        });
        self
    }

    pub fn program_exits(mut self, code: i32, stdout: &str) -> Self {
        self.program_exit = code;
        self.program_stdout = stdout.to_string();
        self
    }

    /// Make every call take `delay` before answering.
    pub fn slow_shell(mut self, delay: Duration) -> Self {
        self.shell_delay = Some(delay);
        self
    }

    /// Report the device as offline once `n` calls have been answered.
    pub fn offline_after(mut self, n: usize) -> Self {
        self.offline_after = Some(n);
        self
    }

    /// Wrap in an `AdbTransport` bound to [`SERIAL`].
    pub fn transport(self) -> AdbTransport<Self> {
        AdbTransport::new(self, "adb", Some(SERIAL.to_string()), QUERY_TIMEOUT)
    }

    /// Shell command lines received, in order.
    pub fn shell_commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .filter_map(|args| args.last().cloned())
            .collect()
    }

    /// Directories listed, in order.
    pub fn listed(&self) -> Vec<String> {
        self.shell_commands()
            .iter()
            .filter_map(|c| c.strip_prefix("ls -1 -A "))
            .map(|p| unquote(p).to_string())
            .collect()
    }

    /// Commands other than filesystem and property queries.
    pub fn executed(&self) -> Vec<String> {
        self.shell_commands()
            .into_iter()
            .filter(|c| !is_query(c))
            .collect()
    }

    pub fn serials(&self) -> Vec<Option<String>> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .map(|args| (args[0] == "-s").then(|| args[1].clone()))
            .collect()
    }

    fn answer(&self, args: &[&str]) -> Output {
        let answered = {
            let mut calls = self.calls.lock().expect("lock");
            calls.push(args.iter().map(|a| (*a).to_string()).collect());
            calls.len() - 1
        };
        if self.offline_after.is_some_and(|n| answered >= n) {
            return err_output(1, "adb: device offline\n");
        }

        let command = args.last().copied().unwrap_or_default();
        if let Some(path) = command.strip_prefix("test -d ") {
            let path = unquote(path);
            let is_dir = self.dirs.contains_key(path) || self.unreadable.iter().any(|u| u == path);
            return err_output(i32::from(!is_dir), "");
        }
        if let Some(path) = command.strip_prefix("ls -1 -A ") {
            let path = unquote(path);
            if self.unreadable.iter().any(|u| u == path) {
                return err_output(1, &format!("ls: {path}: Permission denied\n"));
            }
            return match self.dirs.get(path) {
                Some(children) => {
                    let listing: String = children.iter().map(|c| format!("{c}\r\n")).collect();
                    ok_output(&listing)
                }
                None => err_output(1, "ls: No such file or directory"),
            };
        }
        if command == "getprop ro.product.cpu.abi" {
            return ok_output(&format!("{}\r\n", self.abi));
        }
        if let Some(reply) = self
            .replies
            .iter()
            .find(|r| command.starts_with(r.prefix.as_str()))
        {
            return Output {
                status: exit_status(reply.code),
                stdout: reply.stdout.as_bytes().to_vec(),
                stderr: reply.stderr.as_bytes().to_vec(),
            };
        }
        Output {
            stdout: self.program_stdout.as_bytes().to_vec(),
            ..err_output(self.program_exit, "")
        }
    }

    async fn delay(&self) {
        if let Some(delay) = self.shell_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn is_query(command: &str) -> bool {
    ["test -d ", "ls -1 -A ", "getprop "]
        .iter()
        .any(|prefix| command.starts_with(prefix))
}

fn unquote(word: &str) -> &str {
    word.strip_prefix('\'')
        .and_then(|w| w.strip_suffix('\''))
        .unwrap_or(word)
}

impl CommandRunner for FakeAdb {
    async fn run(&self, _program: &str, args: &[&str]) -> Result<Output> {
        self.delay().await;
        Ok(self.answer(args))
    }

    async fn run_with_timeout(
        &self,
        _program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        self.delay().await;
        Ok(self.answer(args))
    }
}
