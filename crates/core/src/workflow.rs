// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow identifier and entity.

use crate::job::{JobId, JobSpec};
use crate::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a workflow.
    pub struct WorkflowId;
}

crate::define_id! {
    /// Identifier for a branch within a workflow. Scoped by `(WorkflowId, BranchId)`;
    /// not globally unique on its own.
    pub struct BranchId;
}

/// A user-owned container of branches. Never mutated after creation; not
/// destroyed (process-scoped, per the Non-goals in the spec).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: WorkflowId,
    pub name: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    /// All job ids belonging to this workflow, in the order they were created
    /// (branches interleaved in spec order). Every id here exists in the job
    /// registry and belongs to `user_id`.
    pub job_ids: Vec<JobId>,
}

/// One branch's job list, as supplied by the caller of `create_workflow`.
#[derive(Debug, Clone)]
pub struct BranchSpec {
    pub branch_id: String,
    pub jobs: Vec<JobSpec>,
}

/// A workflow-creation request: a name plus one or more branches, each an
/// ordered, non-empty list of jobs.
#[derive(Debug, Clone)]
pub struct WorkflowSpec {
    pub name: String,
    pub branches: Vec<BranchSpec>,
}
