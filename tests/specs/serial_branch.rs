//! A branch is a strictly serial ordering of jobs (§3, §5): job `k+1` may
//! only leave PENDING once job `k` is terminal. This drives a 3-deep branch
//! through a real daemon and checks the ordering held via timestamps, plus
//! that the workflow's overall progress reaches 1.0.

use crate::prelude::*;
use std::time::Duration;

#[test]
fn jobs_in_a_branch_run_strictly_one_after_another() {
    let daemon = DaemonProcess::start_with_env(&[("WSI_SCHEDULER_INTERVAL_MS", "20")]);
    let slide_dir = tempfile::tempdir().expect("scratch dir for slide");
    let slide = write_test_slide(slide_dir.path(), "slide.png");

    let spec = serial_workflow_spec("three-deep-branch", "tissue_mask", &slide, 3);
    let created = submit_workflow(&daemon, "alice", slide_dir.path(), &spec);
    let job_ids: Vec<String> = created["job_ids"]
        .as_array()
        .expect("job_ids array")
        .iter()
        .map(|v| v.as_str().expect("job id string").to_string())
        .collect();
    assert_eq!(job_ids.len(), 3);

    let jobs: Vec<serde_json::Value> = job_ids
        .iter()
        .map(|id| wait_for_terminal_job(&daemon, "alice", id, Duration::from_secs(15)))
        .collect();

    for (i, job) in jobs.iter().enumerate() {
        assert_eq!(job["status"], "SUCCEEDED", "job {i} did not succeed: {job}");
    }

    for i in 1..jobs.len() {
        let prev_finished = jobs[i - 1]["finished_at"].as_str().expect("finished_at on predecessor");
        let this_started = jobs[i]["started_at"].as_str().expect("started_at on job");
        assert!(
            this_started >= prev_finished,
            "job {i} started ({this_started}) before its predecessor finished ({prev_finished})"
        );
    }

    let wf_id = created["id"].as_str().expect("workflow id");
    let workflow = wsi_json(&daemon, "alice", &["workflow", "get", wf_id]);
    assert_eq!(workflow["overall_progress"].as_f64(), Some(1.0));
}
