//! End-to-end lifecycle of a single tissue-mask job: submit through the real
//! CLI, poll to a terminal state, and check both the HTTP result payload and
//! the on-disk artifact layout the daemon is supposed to leave behind
//! (§6.4).

use crate::prelude::*;
use std::time::Duration;

#[test]
fn single_tissue_mask_job_runs_to_completion_and_persists_its_artifacts() {
    let daemon = DaemonProcess::start();
    let slide_dir = tempfile::tempdir().expect("scratch dir for slide");
    let slide = write_test_slide(slide_dir.path(), "slide.png");

    let spec = serial_workflow_spec("single-tissue-mask", "tissue_mask", &slide, 1);
    let created = submit_workflow(&daemon, "alice", slide_dir.path(), &spec);
    let job_id = created["job_ids"][0].as_str().expect("job id in response").to_string();

    let job = wait_for_terminal_job(&daemon, "alice", &job_id, Duration::from_secs(10));
    assert_eq!(job["status"], "SUCCEEDED", "job did not succeed: {job}");
    assert_eq!(job["progress"].as_f64(), Some(1.0));

    let result = wsi_json(&daemon, "alice", &["job", "result", &job_id]);
    assert_eq!(result["job_id"], job_id);
    assert!(result["data"].is_object(), "result.data should be an object: {result}");

    for name in ["progress.json", "result.json", "tissue_mask.png", "tissue_overlay.png"] {
        let path = daemon.outputs_path(&job_id, name);
        assert!(path.exists(), "expected {path:?} to exist after job completion");
    }

    let saved_result: serde_json::Value = serde_json::from_slice(
        &std::fs::read(daemon.outputs_path(&job_id, "result.json")).expect("read result.json"),
    )
    .expect("result.json is valid JSON");
    assert_eq!(
        saved_result, result["data"],
        "GET /jobs/{{id}}/result must wrap exactly what was persisted to disk"
    );
}
