// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use crate::id::SequentialIdGen;
use crate::job::{JobParams, JobSpec, JobType};
use crate::workflow::{BranchSpec, WorkflowSpec};

fn single_job_branch(branch_id: &str, job_type: JobType) -> BranchSpec {
    BranchSpec {
        branch_id: branch_id.to_string(),
        jobs: vec![JobSpec {
            job_type,
            params: JobParams::new(),
        }],
    }
}

fn serial_branch(branch_id: &str, n: usize) -> BranchSpec {
    BranchSpec {
        branch_id: branch_id.to_string(),
        jobs: (0..n)
            .map(|_| JobSpec {
                job_type: JobType::TissueMask,
                params: JobParams::new(),
            })
            .collect(),
    }
}

#[test]
fn create_workflow_rejects_empty_branch() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let user = UserId::new("u1");
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches: vec![BranchSpec {
            branch_id: "b0".to_string(),
            jobs: vec![],
        }],
    };
    let err = store
        .create_workflow(&user, spec, &id_gen, &clock)
        .unwrap_err();
    assert_eq!(err, StoreError::InvalidSpec("branch \"b0\" has zero jobs".to_string()));
}

#[test]
fn create_workflow_inserts_jobs_as_pending() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let user = UserId::new("u1");
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches: vec![single_job_branch("b0", JobType::TissueMask)],
    };
    let wf = store.create_workflow(&user, spec, &id_gen, &clock).unwrap();
    assert_eq!(wf.job_ids.len(), 1);
    let job = store.get_job(&user, &wf.job_ids[0]).unwrap();
    assert_eq!(job.status, JobStatus::Pending);
}

#[test]
fn ownership_isolation_hides_other_users_jobs_and_workflows() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let owner = UserId::new("owner");
    let intruder = UserId::new("intruder");
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches: vec![single_job_branch("b0", JobType::TissueMask)],
    };
    let wf = store
        .create_workflow(&owner, spec, &id_gen, &clock)
        .unwrap();
    let job_id = wf.job_ids[0].clone();

    assert_eq!(
        store.get_job(&intruder, &job_id).unwrap_err(),
        StoreError::NotFound
    );
    assert_eq!(
        store.get_workflow(&intruder, &wf.id).unwrap_err(),
        StoreError::NotFound
    );
    assert_eq!(
        store
            .list_jobs_for_workflow(&intruder, &wf.id)
            .unwrap_err(),
        StoreError::NotFound
    );
    assert!(store.list_workflows_for_user(&intruder).is_empty());
}

#[test]
fn branch_serialization_admits_only_head_of_branch() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let user = UserId::new("u1");
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches: vec![serial_branch("b0", 3)],
    };
    let wf = store.create_workflow(&user, spec, &id_gen, &clock).unwrap();

    let admitted = store.schedule_once(4, 3, &clock);
    assert_eq!(admitted, vec![wf.job_ids[0].clone()]);

    // Second pass: job0 still RUNNING, so job1/job2 stay blocked.
    let admitted2 = store.schedule_once(4, 3, &clock);
    assert!(admitted2.is_empty());

    // Finish job0, then job1 becomes admissible.
    store.with_job_mut(&wf.job_ids[0], |j| j.mark_succeeded(chrono::Utc::now()));
    store.release(&wf.job_ids[0]);
    let admitted3 = store.schedule_once(4, 3, &clock);
    assert_eq!(admitted3, vec![wf.job_ids[1].clone()]);
}

#[test]
fn cancelled_predecessor_does_not_block_successor() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let user = UserId::new("u1");
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches: vec![serial_branch("b0", 2)],
    };
    let wf = store.create_workflow(&user, spec, &id_gen, &clock).unwrap();

    store.cancel_pending(&user, &wf.job_ids[0], &clock).unwrap();
    let admitted = store.schedule_once(4, 3, &clock);
    assert_eq!(admitted, vec![wf.job_ids[1].clone()]);
}

#[test]
fn worker_cap_limits_concurrent_running_jobs() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let user = UserId::new("u1");
    let branches = (0..6)
        .map(|i| single_job_branch(&format!("b{i}"), JobType::TissueMask))
        .collect();
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches,
    };
    store.create_workflow(&user, spec, &id_gen, &clock).unwrap();

    let admitted = store.schedule_once(4, 3, &clock);
    assert_eq!(admitted.len(), 4);
    assert_eq!(store.running_count(), 4);

    // No more slots: further passes admit nothing until a release.
    let admitted2 = store.schedule_once(4, 3, &clock);
    assert!(admitted2.is_empty());
}

#[test]
fn active_user_cap_limits_distinct_concurrent_users() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();

    for i in 0..5 {
        let user = UserId::new(format!("user-{i}"));
        let spec = WorkflowSpec {
            name: "wf".to_string(),
            branches: vec![single_job_branch("b0", JobType::TissueMask)],
        };
        store.create_workflow(&user, spec, &id_gen, &clock).unwrap();
    }

    let admitted = store.schedule_once(10, 3, &clock);
    assert_eq!(admitted.len(), 3);
    assert_eq!(store.active_user_count(), 3);
}

#[test]
fn cancel_pending_resets_tile_accounting() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let user = UserId::new("u1");
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches: vec![single_job_branch("b0", JobType::CellSegmentation)],
    };
    let wf = store.create_workflow(&user, spec, &id_gen, &clock).unwrap();
    let job = store
        .cancel_pending(&user, &wf.job_ids[0], &clock)
        .unwrap();
    assert_eq!(job.status, JobStatus::Cancelled);
    assert_eq!(job.progress, 0.0);
    assert_eq!(job.tiles_done, 0);
}

#[test]
fn cancel_running_job_is_rejected() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let user = UserId::new("u1");
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches: vec![single_job_branch("b0", JobType::CellSegmentation)],
    };
    let wf = store.create_workflow(&user, spec, &id_gen, &clock).unwrap();
    store.schedule_once(4, 3, &clock);
    let err = store
        .cancel_pending(&user, &wf.job_ids[0], &clock)
        .unwrap_err();
    assert_eq!(err, StoreError::NotCancellable);
}

#[test]
fn release_clears_active_user_only_when_no_jobs_remain_running() {
    let store = StateStore::new();
    let id_gen = SequentialIdGen::new("id");
    let clock = FakeClock::new();
    let user = UserId::new("u1");
    let spec = WorkflowSpec {
        name: "wf".to_string(),
        branches: vec![
            single_job_branch("b0", JobType::TissueMask),
            single_job_branch("b1", JobType::TissueMask),
        ],
    };
    store.create_workflow(&user, spec, &id_gen, &clock).unwrap();
    let admitted = store.schedule_once(4, 3, &clock);
    assert_eq!(admitted.len(), 2);
    assert_eq!(store.active_user_count(), 1);

    store.release(&admitted[0]);
    assert_eq!(store.active_user_count(), 1, "other job for user still running");

    store.release(&admitted[1]);
    assert_eq!(store.active_user_count(), 0);
}
