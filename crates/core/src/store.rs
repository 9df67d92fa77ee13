// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The State Store (C1): process-wide registries of workflows, jobs, branch
//! orderings, the running-job set, and the active-user set, guarded by one
//! coarse mutex (the "scheduler lock" of §4.4/§9).
//!
//! [`StateStore::schedule_once`] implements the admission pass algorithm of
//! §4.4 directly against these registries, since the pass needs a single
//! atomic view of exactly the fields this store owns. The periodic loop that
//! calls it, and the worker spawning that follows admission, belong to the
//! engine crate's `AdmissionScheduler` — this method only does the one
//! locked, synchronous step.

use crate::branch::BranchKey;
use crate::clock::Clock;
use crate::error::StoreError;
use crate::id::IdGen;
use crate::job::{Job, JobId, JobStatus};
use crate::user::UserId;
use crate::workflow::{Workflow, WorkflowId, WorkflowSpec};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// A snapshot of who is currently active, for `GET /users/active` (§6.1).
#[derive(Debug, Clone, Default)]
pub struct ActiveUsersSnapshot {
    pub active_users: Vec<UserId>,
    pub running_jobs: Vec<JobId>,
}

#[derive(Default)]
struct Inner {
    workflows: HashMap<WorkflowId, Workflow>,
    jobs: HashMap<JobId, Job>,
    /// Insertion-ordered so the admission pass's "arrival-biased" fairness
    /// (§4.4) is reproducible.
    branch_jobs: IndexMap<BranchKey, Vec<JobId>>,
    running: HashSet<JobId>,
    active_users: HashSet<UserId>,
}

/// Process-wide in-memory registries. Cheap to clone a handle to (wrap in
/// `Arc`); the store itself owns all synchronization.
#[derive(Default)]
pub struct StateStore {
    inner: Mutex<Inner>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workflow: allocate ids, insert jobs as PENDING, append each
    /// to its branch in spec order. Fails with `InvalidSpec` if any branch
    /// is empty.
    pub fn create_workflow(
        &self,
        user: &UserId,
        spec: WorkflowSpec,
        id_gen: &impl IdGen,
        clock: &impl Clock,
    ) -> Result<Workflow, StoreError> {
        if spec.branches.is_empty() {
            return Err(StoreError::InvalidSpec(
                "workflow must have at least one branch".to_string(),
            ));
        }
        for branch in &spec.branches {
            if branch.jobs.is_empty() {
                return Err(StoreError::InvalidSpec(format!(
                    "branch {:?} has zero jobs",
                    branch.branch_id
                )));
            }
        }

        let now = crate::clock::epoch_ms_to_datetime(clock.epoch_ms());
        let workflow_id = WorkflowId::new(id_gen.next());
        let mut job_ids = Vec::new();

        let mut inner = self.inner.lock();
        for branch in &spec.branches {
            let branch_id = crate::workflow::BranchId::new(branch.branch_id.clone());
            let key = BranchKey::new(workflow_id.clone(), branch_id.clone());
            let mut ordered = Vec::with_capacity(branch.jobs.len());
            for job_spec in &branch.jobs {
                let job_id = JobId::new(id_gen.next());
                let job = Job::new(
                    job_id.clone(),
                    workflow_id.clone(),
                    branch_id.clone(),
                    user.clone(),
                    job_spec.clone(),
                    now,
                );
                if inner.jobs.insert(job_id.clone(), job).is_some() {
                    return Err(StoreError::InvalidSpec(
                        "generated job id collided with an existing job".to_string(),
                    ));
                }
                ordered.push(job_id.clone());
                job_ids.push(job_id);
            }
            inner.branch_jobs.insert(key, ordered);
        }

        let workflow = Workflow {
            id: workflow_id.clone(),
            name: spec.name,
            user_id: user.clone(),
            created_at: now,
            job_ids,
        };
        inner.workflows.insert(workflow_id, workflow.clone());
        Ok(workflow)
    }

    pub fn get_job(&self, user: &UserId, job_id: &JobId) -> Result<Job, StoreError> {
        let inner = self.inner.lock();
        let job = inner.jobs.get(job_id).ok_or(StoreError::NotFound)?;
        if &job.user_id != user {
            return Err(StoreError::NotFound);
        }
        Ok(job.clone())
    }

    pub fn get_workflow(&self, user: &UserId, wf_id: &WorkflowId) -> Result<Workflow, StoreError> {
        let inner = self.inner.lock();
        let wf = inner.workflows.get(wf_id).ok_or(StoreError::NotFound)?;
        if &wf.user_id != user {
            return Err(StoreError::NotFound);
        }
        Ok(wf.clone())
    }

    pub fn list_workflows_for_user(&self, user: &UserId) -> Vec<Workflow> {
        let inner = self.inner.lock();
        inner
            .workflows
            .values()
            .filter(|wf| &wf.user_id == user)
            .cloned()
            .collect()
    }

    pub fn list_jobs_for_workflow(
        &self,
        user: &UserId,
        wf_id: &WorkflowId,
    ) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.lock();
        let wf = inner.workflows.get(wf_id).ok_or(StoreError::NotFound)?;
        if &wf.user_id != user {
            return Err(StoreError::NotFound);
        }
        Ok(wf
            .job_ids
            .iter()
            .filter_map(|id| inner.jobs.get(id))
            .cloned()
            .collect())
    }

    /// PENDING -> CANCELLED. `NotCancellable` for any other current status.
    pub fn cancel_pending(
        &self,
        user: &UserId,
        job_id: &JobId,
        clock: &impl Clock,
    ) -> Result<Job, StoreError> {
        let now = crate::clock::epoch_ms_to_datetime(clock.epoch_ms());
        let mut inner = self.inner.lock();
        let job = inner.jobs.get_mut(job_id).ok_or(StoreError::NotFound)?;
        if &job.user_id != user {
            return Err(StoreError::NotFound);
        }
        if job.status != JobStatus::Pending {
            return Err(StoreError::NotCancellable);
        }
        job.mark_cancelled(now);
        Ok(job.clone())
    }

    /// Mutate a running job's mutable fields (progress/tile accounting).
    /// Used exclusively by the job's own Lifecycle Controller (§3: "A job is
    /// owned by... the Job Lifecycle Controller for mutation while RUNNING").
    pub fn with_job_mut<R>(&self, job_id: &JobId, f: impl FnOnce(&mut Job) -> R) -> Option<R> {
        let mut inner = self.inner.lock();
        inner.jobs.get_mut(job_id).map(f)
    }

    pub fn get_job_by_id(&self, job_id: &JobId) -> Option<Job> {
        self.inner.lock().jobs.get(job_id).cloned()
    }

    /// The admission pass (§4.4). Returns the ids of jobs just transitioned
    /// PENDING -> RUNNING; the caller spawns a Job Lifecycle Controller for
    /// each, outside this method's lock.
    pub fn schedule_once(
        &self,
        max_workers: usize,
        max_active_users: usize,
        clock: &impl Clock,
    ) -> Vec<JobId> {
        let mut inner = self.inner.lock();
        if inner.running.len() >= max_workers {
            return Vec::new();
        }

        let candidates = first_runnable_job_per_branch(&inner);

        let now = crate::clock::epoch_ms_to_datetime(clock.epoch_ms());
        let mut admitted = Vec::new();
        for job_id in candidates {
            if inner.running.len() >= max_workers {
                break;
            }
            let user_id = match inner.jobs.get(&job_id) {
                Some(job) => job.user_id.clone(),
                None => continue,
            };
            if !inner.active_users.contains(&user_id) && inner.active_users.len() >= max_active_users
            {
                continue;
            }
            let Some(job) = inner.jobs.get_mut(&job_id) else {
                continue;
            };
            if job.status != JobStatus::Pending {
                continue;
            }
            job.mark_running(now);
            inner.running.insert(job_id.clone());
            inner.active_users.insert(user_id);
            admitted.push(job_id);
        }
        admitted
    }

    /// Release a terminated job's admission slot: remove it from the
    /// running set, and drop its user from the active-user set if no other
    /// running job shares that user (§4.5 step 4).
    pub fn release(&self, job_id: &JobId) {
        let mut inner = self.inner.lock();
        inner.running.remove(job_id);
        let Some(job) = inner.jobs.get(job_id) else {
            return;
        };
        let user_id = job.user_id.clone();
        let still_active = inner
            .running
            .iter()
            .filter_map(|id| inner.jobs.get(id))
            .any(|j| j.user_id == user_id);
        if !still_active {
            inner.active_users.remove(&user_id);
        }
    }

    pub fn active_users_snapshot(&self) -> ActiveUsersSnapshot {
        let inner = self.inner.lock();
        ActiveUsersSnapshot {
            active_users: inner.active_users.iter().cloned().collect(),
            running_jobs: inner.running.iter().cloned().collect(),
        }
    }

    pub fn running_count(&self) -> usize {
        self.inner.lock().running.len()
    }

    pub fn active_user_count(&self) -> usize {
        self.inner.lock().active_users.len()
    }
}

/// For every branch, in branch-map insertion order, the first PENDING job
/// whose predecessors in that branch are all terminal (CANCELLED/FAILED
/// don't block; PENDING/RUNNING do). At most one candidate per branch.
fn first_runnable_job_per_branch(inner: &Inner) -> Vec<JobId> {
    let mut runnable = Vec::new();
    for job_ids in inner.branch_jobs.values() {
        for (idx, job_id) in job_ids.iter().enumerate() {
            let Some(job) = inner.jobs.get(job_id) else {
                continue;
            };
            if job.status != JobStatus::Pending {
                continue;
            }
            let blocked = job_ids[..idx].iter().any(|prev_id| {
                inner
                    .jobs
                    .get(prev_id)
                    .map(|prev| matches!(prev.status, JobStatus::Pending | JobStatus::Running))
                    .unwrap_or(false)
            });
            if !blocked {
                runnable.push(job_id.clone());
            }
            break;
        }
    }
    runnable
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
