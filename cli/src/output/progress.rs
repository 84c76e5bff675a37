//! Progress indicators using indicatif

#![allow(clippy::expect_used)] // Templates are compile-time constants

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for indeterminate progress, such as a running test binary.
///
/// # Panics
///
/// Panics if the spinner template string is invalid (it is a compile-time constant and will not panic).
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠁", "⠂", "⠄", "⡀", "⡈", "⡐", "⡠", "⣀", "⣁", "⣂", "⣄", "⣌", "⣔", "⣤", "⣥", "⣦",
                "⣮", "⣶", "⣷", "⣿", "⡿", "⠿", "⢟", "⠟", "⡛", "⠛", "⠫", "⢋", "⠋", "⠍", "⡉", "⠉",
                "⠑", "⠡", "⢁",
            ])
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a checkmark on the left.
pub fn finish_ok(pb: &ProgressBar, msg: &str) {
    finish_with_prefix(pb, "✓", msg);
}

/// Finish a spinner with a cross on the left.
pub fn finish_error(pb: &ProgressBar, msg: &str) {
    finish_with_prefix(pb, "✗", msg);
}

fn finish_with_prefix(pb: &ProgressBar, prefix: &'static str, msg: &str) {
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix} {msg}")
            .expect("valid template"),
    );
    pb.set_prefix(prefix);
    pb.finish_with_message(msg.to_string());
}

/// Run `fut` behind a spinner when `show` is set.
///
/// The spinner is cleared when the future resolves; callers print the result.
pub async fn with_spinner<F: std::future::Future>(show: bool, msg: &str, fut: F) -> F::Output {
    if !show {
        return fut.await;
    }
    let pb = spinner(msg);
    let out = fut.await;
    pb.finish_and_clear();
    out
}
