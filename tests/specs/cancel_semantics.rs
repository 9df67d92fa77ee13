//! Cancelling a still-PENDING job in the middle of a branch must not block
//! its successor: only the predecessor's terminal status matters for
//! admission, not *which* terminal status it reached (§4.1, §5).

use crate::prelude::*;
use std::time::Duration;

#[test]
fn cancelling_a_middle_job_lets_its_successor_still_run() {
    // A slow scheduler tick gives us a wide, reliable window to cancel
    // job[1] while job[0] is still running (job[1] cannot leave PENDING
    // until job[0] is terminal, so there is no race here).
    let daemon = DaemonProcess::start_with_env(&[("WSI_SCHEDULER_INTERVAL_MS", "300")]);
    let slide_dir = tempfile::tempdir().expect("scratch dir for slide");
    let slide = write_test_slide(slide_dir.path(), "slide.png");

    let spec = serial_workflow_spec("cancel-middle-job", "tissue_mask", &slide, 3);
    let created = submit_workflow(&daemon, "alice", slide_dir.path(), &spec);
    let job_ids: Vec<String> = created["job_ids"]
        .as_array()
        .expect("job_ids array")
        .iter()
        .map(|v| v.as_str().expect("job id string").to_string())
        .collect();
    assert_eq!(job_ids.len(), 3);

    let cancelled = wsi_json(&daemon, "alice", &["job", "cancel", &job_ids[1]]);
    assert_eq!(cancelled["status"], "CANCELLED", "job[1] should still be PENDING at cancel time: {cancelled}");

    let job0 = wait_for_terminal_job(&daemon, "alice", &job_ids[0], Duration::from_secs(15));
    assert_eq!(job0["status"], "SUCCEEDED", "job[0]: {job0}");

    let job1 = wait_for_terminal_job(&daemon, "alice", &job_ids[1], Duration::from_secs(15));
    assert_eq!(job1["status"], "CANCELLED", "job[1]: {job1}");
    assert_eq!(job1["progress"].as_f64(), Some(0.0));
    assert_eq!(job1["tiles_done"].as_u64(), Some(0));

    let job2 = wait_for_terminal_job(&daemon, "alice", &job_ids[2], Duration::from_secs(15));
    assert_eq!(
        job2["status"], "SUCCEEDED",
        "a cancelled predecessor must not block job[2]: {job2}"
    );
}
