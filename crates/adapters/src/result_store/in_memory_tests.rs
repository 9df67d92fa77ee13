// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wsi_core::{Job, JobSpec, JobType, UserId, WorkflowId};

fn sample_job() -> Job {
    Job::new(
        JobId::new("job-1"),
        WorkflowId::new("wf-1"),
        wsi_core::BranchId::new("b0"),
        UserId::new("u1"),
        JobSpec {
            job_type: JobType::TissueMask,
            params: Default::default(),
        },
        chrono::Utc::now(),
    )
}

#[tokio::test]
async fn save_and_load_result_roundtrips() {
    let store = InMemoryResultStore::new();
    let job = sample_job();
    let payload = ResultPayload::TissueMask {
        wsi_path: "/slides/a.svs".to_string(),
        tissue_mask_png: "/outputs/job-1/tissue_mask.png".to_string(),
        tissue_overlay_png: "/outputs/job-1/tissue_overlay.png".to_string(),
    };
    store.save_result(&job.id, &payload).await.unwrap();
    let loaded = store.load_result(&job.id).await.unwrap();
    assert_eq!(loaded, Some(payload));
}

#[tokio::test]
async fn load_result_is_none_before_any_save() {
    let store = InMemoryResultStore::new();
    let job = sample_job();
    assert_eq!(store.load_result(&job.id).await.unwrap(), None);
}

#[tokio::test]
async fn save_progress_reflects_job_snapshot() {
    let store = InMemoryResultStore::new();
    let mut job = sample_job();
    job.tiles_total = 4;
    job.tiles_done = 2;
    job.recompute_progress();
    store.save_progress(&job).await.unwrap();

    let sidecar = store.progress_for(&job.id).unwrap();
    assert_eq!(sidecar.tiles_done, 2);
    assert_eq!(sidecar.progress, 0.5);
}

#[tokio::test]
async fn save_artifact_stores_raw_bytes() {
    let store = InMemoryResultStore::new();
    let job = sample_job();
    store
        .save_artifact(&job.id, "mask.png", &[1, 2, 3])
        .await
        .unwrap();
    assert_eq!(
        store.artifact_bytes(&job.id, "mask.png"),
        Some(vec![1, 2, 3])
    );
}

#[tokio::test]
async fn load_artifact_is_none_before_any_save() {
    let store = InMemoryResultStore::new();
    let job = sample_job();
    assert_eq!(store.load_artifact(&job.id, "mask.png").await.unwrap(), None);
}

#[tokio::test]
async fn load_artifact_matches_saved_bytes() {
    let store = InMemoryResultStore::new();
    let job = sample_job();
    store
        .save_artifact(&job.id, "overlay.png", &[9, 9])
        .await
        .unwrap();
    assert_eq!(
        store.load_artifact(&job.id, "overlay.png").await.unwrap(),
        Some(vec![9, 9])
    );
}
