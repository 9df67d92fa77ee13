// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier, status state machine, and the job entity.

use crate::branch::BranchKey;
use crate::user::UserId;
use crate::workflow::{BranchId, WorkflowId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

crate::define_id! {
    /// Unique identifier for a job instance.
    pub struct JobId;
}

/// The two job kinds the tiled job runtime knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    CellSegmentation,
    TissueMask,
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::CellSegmentation => write!(f, "cell_segmentation"),
            JobType::TissueMask => write!(f, "tissue_mask"),
        }
    }
}

/// Status of a job. Legal transitions form the DAG:
/// `Pending -> {Running, Cancelled}`, `Running -> {Succeeded, Failed}`.
/// `Succeeded`, `Failed`, and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{s}")
    }
}

/// Free-form, opaque job parameters (§6.2). Unknown keys are preserved but
/// ignored by the runtime.
pub type JobParams = HashMap<String, serde_json::Value>;

/// Everything needed to create a job inside a branch.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub job_type: JobType,
    pub params: JobParams,
}

/// A job instance and its full state-machine fields (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub workflow_id: WorkflowId,
    pub branch_id: BranchId,
    pub user_id: UserId,
    pub job_type: JobType,
    pub params: JobParams,

    pub status: JobStatus,
    /// `tiles_done / tiles_total` while `tiles_total > 0`, else `0`. Exactly
    /// `1.0` once `status == Succeeded`.
    pub progress: f64,
    pub tiles_done: u64,
    pub tiles_total: u64,
    pub error: Option<String>,

    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(
        id: JobId,
        workflow_id: WorkflowId,
        branch_id: BranchId,
        user_id: UserId,
        spec: JobSpec,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            workflow_id,
            branch_id,
            user_id,
            job_type: spec.job_type,
            params: spec.params,
            status: JobStatus::Pending,
            progress: 0.0,
            tiles_done: 0,
            tiles_total: 0,
            error: None,
            created_at: now,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn branch_key(&self) -> BranchKey {
        BranchKey::new(self.workflow_id.clone(), self.branch_id.clone())
    }

    /// Recompute `progress` from `tiles_done`/`tiles_total` per the
    /// normalization rule in §3/§9: zero tiles means zero progress, even
    /// while running. The Lifecycle Controller overrides this to `1.0` on
    /// `Succeeded` regardless of tile arithmetic.
    pub fn recompute_progress(&mut self) {
        self.progress = if self.tiles_total > 0 {
            self.tiles_done as f64 / self.tiles_total as f64
        } else {
            0.0
        };
    }

    /// PENDING -> RUNNING. Caller (the admission scheduler) must already hold
    /// whatever lock guards the registries; this only mutates `self`.
    pub fn mark_running(&mut self, now: DateTime<Utc>) {
        debug_assert_eq!(self.status, JobStatus::Pending);
        self.status = JobStatus::Running;
        self.progress = 0.0;
        self.tiles_done = 0;
        self.tiles_total = 0;
        self.started_at = Some(now);
    }

    /// RUNNING -> SUCCEEDED.
    pub fn mark_succeeded(&mut self, now: DateTime<Utc>) {
        debug_assert_eq!(self.status, JobStatus::Running);
        self.status = JobStatus::Succeeded;
        self.progress = 1.0;
        self.finished_at = Some(now);
    }

    /// RUNNING -> FAILED.
    pub fn mark_failed(&mut self, error: String, now: DateTime<Utc>) {
        debug_assert_eq!(self.status, JobStatus::Running);
        self.status = JobStatus::Failed;
        self.error = Some(error);
        self.finished_at = Some(now);
    }

    /// PENDING -> CANCELLED. Resets tile accounting and progress to zero
    /// per §4.1.
    pub fn mark_cancelled(&mut self, now: DateTime<Utc>) {
        debug_assert_eq!(self.status, JobStatus::Pending);
        self.status = JobStatus::Cancelled;
        self.progress = 0.0;
        self.tiles_done = 0;
        self.tiles_total = 0;
        self.finished_at = Some(now);
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
