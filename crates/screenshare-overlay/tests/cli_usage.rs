//! Process-level tests for the command-line surface.
//!
//! Usage errors must be reported before any display connection is
//! attempted, so `DISPLAY` is pointed at a server that does not exist: if the
//! binary tried to connect, the output would mention `XOpenDisplay`.

use std::process::{Command, Output};

fn run_overlay_bin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_screenshare-overlay"))
        .args(args)
        .env("DISPLAY", ":4242")
        .env_remove("OVERLAY_MONITOR_NAME")
        .output()
        .expect("spawn screenshare-overlay")
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    // Act
    let out = run_overlay_bin(&[]);

    // Assert
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success());
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
    assert!(!stderr.contains("XOpenDisplay"));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_three_arguments_prints_usage_and_fails() {
    let out = run_overlay_bin(&["400", "300", "100"]);

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success());
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
    assert!(!stderr.contains("XOpenDisplay"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_unreachable_display_fails_without_waiting() {
    let out = run_overlay_bin(&["400", "300", "100", "50"]);

    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr.contains("cannot open X display"), "stderr was: {stderr}");
    assert!(!stdout.contains("waiting for sigint"));
}
