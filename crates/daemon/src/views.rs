// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON views served by the HTTP surface (§6.1). `Job` already mirrors the
//! entity fields the spec wants for `JobView`, so it is returned as-is;
//! `WorkflowView` and `ActiveUsersView` add derived fields the entities
//! themselves don't carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wsi_core::{ActiveUsersSnapshot, Job, JobId, JobParams, JobType, UserId, Workflow, WorkflowId};

pub type JobView = Job;

#[derive(Debug, Serialize)]
pub struct WorkflowView {
    pub id: WorkflowId,
    pub name: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub job_ids: Vec<JobId>,
    pub overall_progress: f64,
}

impl WorkflowView {
    /// `overall_progress` is the arithmetic mean of member jobs' progress,
    /// `0` if the workflow has no jobs (can't happen per `create_workflow`'s
    /// own invariant, but the empty case is handled rather than divided by
    /// zero).
    pub fn build(workflow: &Workflow, jobs: &[Job]) -> Self {
        let overall_progress = if jobs.is_empty() {
            0.0
        } else {
            jobs.iter().map(|j| j.progress).sum::<f64>() / jobs.len() as f64
        };
        Self {
            id: workflow.id.clone(),
            name: workflow.name.clone(),
            user_id: workflow.user_id.clone(),
            created_at: workflow.created_at,
            job_ids: workflow.job_ids.clone(),
            overall_progress,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActiveUsersView {
    pub active_users: Vec<UserId>,
    pub running_jobs: Vec<JobId>,
    pub count_active_users: usize,
    pub count_running_jobs: usize,
}

impl From<ActiveUsersSnapshot> for ActiveUsersView {
    fn from(snapshot: ActiveUsersSnapshot) -> Self {
        Self {
            count_active_users: snapshot.active_users.len(),
            count_running_jobs: snapshot.running_jobs.len(),
            active_users: snapshot.active_users,
            running_jobs: snapshot.running_jobs,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurrentUserView {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct JobResultView {
    pub job_id: JobId,
    pub data: wsi_adapters::ResultPayload,
}

/// Request body for `POST /workflows` (§6.2). A thin, `Deserialize`-able
/// mirror of `wsi_core::WorkflowSpec` — the core types stay free of
/// transport concerns and only derive `Deserialize` here, at the edge.
#[derive(Debug, Deserialize)]
pub struct WorkflowSpecBody {
    pub name: String,
    pub branches: Vec<BranchSpecBody>,
}

#[derive(Debug, Deserialize)]
pub struct BranchSpecBody {
    pub branch_id: String,
    pub jobs: Vec<JobSpecBody>,
}

#[derive(Debug, Deserialize)]
pub struct JobSpecBody {
    pub job_type: JobType,
    #[serde(default)]
    pub params: JobParams,
}

impl From<WorkflowSpecBody> for wsi_core::WorkflowSpec {
    fn from(body: WorkflowSpecBody) -> Self {
        wsi_core::WorkflowSpec {
            name: body.name,
            branches: body.branches.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BranchSpecBody> for wsi_core::BranchSpec {
    fn from(body: BranchSpecBody) -> Self {
        wsi_core::BranchSpec {
            branch_id: body.branch_id,
            jobs: body.jobs.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<JobSpecBody> for wsi_core::JobSpec {
    fn from(body: JobSpecBody) -> Self {
        wsi_core::JobSpec {
            job_type: body.job_type,
            params: body.params,
        }
    }
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
