//! Smoke tests for the CLI binary itself, independent of any daemon.

use crate::prelude::*;
use assert_cmd::Command;

#[test]
fn wsi_help_lists_the_three_resource_subcommands() {
    let assert = Command::new(binary_path("wsi")).arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for name in ["workflow", "job", "user"] {
        assert!(stdout.contains(name), "--help output missing {name:?}: {stdout}");
    }
}

#[test]
fn wsi_reports_a_clean_error_when_no_daemon_is_listening() {
    // Nothing is bound on this port: the client should surface a transport
    // error on stderr and a non-zero exit, not panic.
    let assert = Command::new(binary_path("wsi"))
        .env("WSI_DAEMON_URL", "http://127.0.0.1:1")
        .env("WSI_USER", "alice")
        .args(["-o", "json", "user", "me"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Error"), "stderr: {stderr}");
}
