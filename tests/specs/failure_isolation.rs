//! A job that can't even open its source image must FAIL with a descriptive
//! error rather than wedge the scheduler: the admission slot it held has to
//! be released so later jobs (even another user's) keep being admitted
//! (§4.1, §5, §7).

use crate::prelude::*;
use std::time::Duration;

#[test]
fn a_failed_job_releases_its_slot_and_does_not_block_the_scheduler() {
    let daemon = DaemonProcess::start();
    let scratch = tempfile::tempdir().expect("scratch dir");
    let missing = scratch.path().join("does-not-exist.svs");

    let bad_spec = serial_workflow_spec("bad-path", "tissue_mask", &missing, 1);
    let bad_created = submit_workflow(&daemon, "alice", scratch.path(), &bad_spec);
    let bad_job_id = bad_created["job_ids"][0].as_str().expect("job id").to_string();

    let bad_job = wait_for_terminal_job(&daemon, "alice", &bad_job_id, Duration::from_secs(10));
    assert_eq!(bad_job["status"], "FAILED", "job: {bad_job}");
    let error = bad_job["error"].as_str().expect("FAILED job carries an error message");
    assert!(
        error.contains("does-not-exist.svs"),
        "error should mention the unreadable path, got: {error}"
    );

    let slide = write_test_slide(scratch.path(), "good.png");
    let good_spec = serial_workflow_spec("good-path", "tissue_mask", &slide, 1);
    let good_created = submit_workflow(&daemon, "bob", scratch.path(), &good_spec);
    let good_job_id = good_created["job_ids"][0].as_str().expect("job id").to_string();

    let good_job = wait_for_terminal_job(&daemon, "bob", &good_job_id, Duration::from_secs(10));
    assert_eq!(
        good_job["status"], "SUCCEEDED",
        "a prior failure must not wedge the scheduler for later jobs: {good_job}"
    );
}
