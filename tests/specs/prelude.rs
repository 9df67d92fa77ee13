//! Black-box test helpers: spawn the real `wsid` daemon as a subprocess and
//! drive it through the real `wsi` CLI binary, so these specs exercise the
//! whole admission-scheduler + tiled-job-runtime pipeline end to end rather
//! than any one crate in isolation.

#![allow(dead_code)]

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};
use std::sync::mpsc;
use std::time::Duration;

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns the path to a binary built by this workspace, checking the
/// standard `target/debug` directory first and falling back to resolving
/// relative to the test binary itself (so this still works if
/// `CARGO_MANIFEST_DIR` points somewhere stale, e.g. under a coverage run).
pub fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// A running `wsid` daemon bound to an OS-assigned loopback port, with its
/// own scratch output directory. Killed on drop.
pub struct DaemonProcess {
    child: Child,
    pub base_url: String,
    pub output_dir: TempDir,
}

impl DaemonProcess {
    /// Start with the spec's default scheduler tunables (§4.4).
    pub fn start() -> Self {
        Self::start_with_env(&[])
    }

    /// Start with additional environment overrides (e.g.
    /// `WSI_SCHEDULER_INTERVAL_MS` for a snappier admission loop in tests).
    pub fn start_with_env(envs: &[(&str, &str)]) -> Self {
        let output_dir = tempfile::tempdir().expect("create scratch output dir");

        let mut cmd = std::process::Command::new(binary_path("wsid"));
        cmd.env("WSI_BIND_ADDR", "127.0.0.1:0")
            .env("WSI_OUTPUT_DIR", output_dir.path())
            .env("RUST_LOG", "info")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in envs {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().expect("spawn wsid");
        let stdout = child.stdout.take().expect("wsid stdout is piped");

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                if line.contains("listening") {
                    let _ = tx.send(line);
                    return;
                }
            }
        });

        let line = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("wsid did not report its listening address in time");
        let addr = line
            .split("addr=")
            .nth(1)
            .map(str::trim)
            .expect("listening log line carries addr=...");

        Self {
            child,
            base_url: format!("http://{addr}"),
            output_dir,
        }
    }

    pub fn outputs_path(&self, job_id: &str, name: &str) -> PathBuf {
        self.output_dir.path().join(job_id).join(name)
    }
}

impl Drop for DaemonProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Builds a `wsi` CLI invocation aimed at `daemon`, asserting as `user`,
/// with JSON output so assertions can parse stdout directly.
pub fn wsi_cmd(daemon: &DaemonProcess, user: &str) -> Command {
    let mut cmd = Command::new(binary_path("wsi"));
    cmd.env("WSI_DAEMON_URL", &daemon.base_url)
        .env("WSI_USER", user)
        .args(["-o", "json"]);
    cmd
}

/// Runs a `wsi` subcommand, asserts success, and parses stdout as JSON.
pub fn wsi_json(daemon: &DaemonProcess, user: &str, args: &[&str]) -> serde_json::Value {
    let output = wsi_cmd(daemon, user)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("wsi printed valid JSON")
}

/// Writes a tiny synthetic "slide": the left half dark (tissue-like), the
/// right half bright (background-like), so tissue-mask thresholding and
/// cell-segmentation tiling both have something non-trivial to chew on.
pub fn write_test_slide(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut img = image::RgbImage::new(64, 64);
    for (x, _y, px) in img.enumerate_pixels_mut() {
        *px = if x < 32 {
            image::Rgb([20, 20, 20])
        } else {
            image::Rgb([230, 230, 230])
        };
    }
    img.save(&path).expect("write synthetic test slide");
    path
}

/// Polls `wsi job get <id>` until its status is terminal, or panics after
/// `timeout`.
pub fn wait_for_terminal_job(
    daemon: &DaemonProcess,
    user: &str,
    job_id: &str,
    timeout: Duration,
) -> serde_json::Value {
    let deadline = std::time::Instant::now() + timeout;
    loop {
        let job = wsi_json(daemon, user, &["job", "get", job_id]);
        let status = job["status"].as_str().unwrap_or_default();
        if matches!(status, "SUCCEEDED" | "FAILED" | "CANCELLED") {
            return job;
        }
        if std::time::Instant::now() >= deadline {
            panic!("job {job_id} never reached a terminal state (last: {job})");
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

/// A single-branch workflow spec JSON body, `n` jobs of `job_type` deep,
/// each pointed at `wsi_path` (§6.1/§6.2's `WorkflowSpec`).
pub fn serial_workflow_spec(name: &str, job_type: &str, wsi_path: &Path, n: usize) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "branches": [
            {
                "branch_id": "b0",
                "jobs": (0..n).map(|_| serde_json::json!({
                    "job_type": job_type,
                    "params": {"wsi_path": wsi_path.to_string_lossy()}
                })).collect::<Vec<_>>()
            }
        ]
    })
}

/// `workflow submit` takes a file path, so this writes `spec` to a scratch
/// JSON file (inside `scratch`, which the caller keeps alive) and submits it.
pub fn submit_workflow(
    daemon: &DaemonProcess,
    user: &str,
    scratch: &Path,
    spec: &serde_json::Value,
) -> serde_json::Value {
    let spec_path = scratch.join("workflow.json");
    std::fs::write(&spec_path, serde_json::to_vec(spec).expect("serialize workflow spec"))
        .expect("write workflow spec file");
    let path_arg = spec_path.to_string_lossy().to_string();
    wsi_json(daemon, user, &["workflow", "submit", &path_arg])
}
