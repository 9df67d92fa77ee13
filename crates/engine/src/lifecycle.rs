// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Job Lifecycle Controller (C5): wraps one admitted job's execution,
//! classifies the outcome, and — on every exit path, including a panic
//! inside the tile runtime — releases the job's admission slot (§4.5, §7).

use crate::runtime_deps::RuntimeDeps;
use crate::tile_runtime;
use std::sync::Arc;
use wsi_core::{Clock, JobId, StateStore};

/// Spawn the controller for a job the scheduler just admitted. Runs on its
/// own task so the admission pass that called this never blocks on it.
pub fn spawn_job<C>(job_id: JobId, store: Arc<StateStore>, deps: Arc<RuntimeDeps>, clock: C)
where
    C: Clock + 'static,
{
    tokio::spawn(run_lifecycle(job_id, store, deps, clock));
}

async fn run_lifecycle<C: Clock + 'static>(
    job_id: JobId,
    store: Arc<StateStore>,
    deps: Arc<RuntimeDeps>,
    clock: C,
) {
    let Some(job) = store.get_job_by_id(&job_id) else {
        return;
    };

    // A nested spawn lets us observe a panic inside the tile runtime as a
    // `JoinError` rather than letting it unwind into this task and skip
    // the release step below — tokio isolates panics per task either way,
    // but without the nested join we'd have no outcome to classify.
    let inner_store = store.clone();
    let inner_deps = deps.clone();
    let handle =
        tokio::spawn(async move { tile_runtime::run_job(&job, &inner_store, &inner_deps).await });

    let now = wsi_core::epoch_ms_to_datetime(clock.epoch_ms());
    match handle.await {
        Ok(Ok(_payload)) => {
            store.with_job_mut(&job_id, |j| j.mark_succeeded(now));
        }
        Ok(Err(err)) => {
            store.with_job_mut(&job_id, |j| j.mark_failed(err.to_string(), now));
        }
        Err(join_err) => {
            let message = if join_err.is_panic() {
                "job runtime panicked".to_string()
            } else {
                "job runtime was cancelled".to_string()
            };
            store.with_job_mut(&job_id, |j| j.mark_failed(message, now));
        }
    }

    if let Some(job) = store.get_job_by_id(&job_id) {
        let _ = deps.result_store.save_progress(&job).await;
    }
    store.release(&job_id);
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
