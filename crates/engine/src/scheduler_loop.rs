// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Admission Scheduler's periodic loop (C4, §4.4): sleep
//! `SchedulerInterval`, run one admission pass, spawn a Lifecycle
//! Controller for everything it admits, repeat. The scheduler lock (inside
//! [`StateStore::schedule_once`]) is held only for the synchronous pass
//! itself — never across this loop's sleep, and never across a spawned
//! job's blocking I/O (§5, §9).

use crate::config::SchedulerConfig;
use crate::lifecycle;
use crate::runtime_deps::RuntimeDeps;
use std::sync::Arc;
use tracing::{debug, info_span};
use wsi_core::{Clock, StateStore};

/// Spawns the loop as its own task and returns a handle the daemon can hold
/// (and, in tests, abort) without blocking on it.
pub fn spawn_scheduler_loop<C>(
    store: Arc<StateStore>,
    deps: Arc<RuntimeDeps>,
    config: SchedulerConfig,
    clock: C,
) -> tokio::task::JoinHandle<()>
where
    C: Clock + 'static,
{
    tokio::spawn(async move {
        loop {
            let span = info_span!("schedule_once");
            let _guard = span.enter();
            let admitted = store.schedule_once(config.max_workers, config.max_active_users, &clock);
            drop(_guard);

            for job_id in &admitted {
                debug!(job_id = %job_id, "admitted job, spawning lifecycle controller");
                lifecycle::spawn_job(job_id.clone(), store.clone(), deps.clone(), clock.clone());
            }
            tokio::time::sleep(config.scheduler_interval).await;
        }
    })
}

#[cfg(test)]
#[path = "scheduler_loop_tests.rs"]
mod tests;
