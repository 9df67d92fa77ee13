// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::AppError;
use crate::extract::RequestUser;
use crate::state::AppState;
use crate::views::{JobResultView, JobView};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use wsi_core::{JobId, JobType, WorkflowId};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs/workflow/:wf_id", get(list_jobs_for_workflow))
        .route("/jobs/:job_id", get(get_job))
        .route("/jobs/:job_id/cancel", post(cancel_job))
        .route("/jobs/:job_id/result", get(get_result))
        .route("/jobs/:job_id/result/mask", get(get_mask_png))
        .route("/jobs/:job_id/result/overlay", get(get_overlay_png))
}

async fn get_job(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(job_id): Path<String>,
) -> Result<Json<JobView>, AppError> {
    let job = state.store.get_job(&user, &JobId::new(job_id))?;
    Ok(Json(job))
}

async fn list_jobs_for_workflow(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(wf_id): Path<String>,
) -> Result<Json<Vec<JobView>>, AppError> {
    let jobs = state
        .store
        .list_jobs_for_workflow(&user, &WorkflowId::new(wf_id))?;
    Ok(Json(jobs))
}

async fn cancel_job(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(job_id): Path<String>,
) -> Result<Json<JobView>, AppError> {
    let job = state
        .store
        .cancel_pending(&user, &JobId::new(job_id), &state.clock)?;
    Ok(Json(job))
}

async fn get_result(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(job_id): Path<String>,
) -> Result<Json<JobResultView>, AppError> {
    let job_id = JobId::new(job_id);
    // Ownership check first: a cross-user job id must read as 404, never
    // leak whether a result happens to exist for it.
    let job = state.store.get_job(&user, &job_id)?;
    // PENDING/RUNNING: no result could exist yet, so say so distinctly
    // from "never will" (§6.1, §7). Terminal-but-missing (including a
    // FAILED job that never wrote result.json) stays a plain 404.
    if !job.status.is_terminal() {
        return Err(AppError::NotFinished);
    }
    let data = state
        .result_store
        .load_result(&job_id)
        .await
        .map_err(|_| AppError::Store(wsi_core::StoreError::NotFound))?
        .ok_or(AppError::Store(wsi_core::StoreError::NotFound))?;
    Ok(Json(JobResultView { job_id, data }))
}

fn mask_artifact_name(job_type: JobType) -> &'static str {
    match job_type {
        JobType::CellSegmentation => "mask.png",
        JobType::TissueMask => "tissue_mask.png",
    }
}

fn overlay_artifact_name(job_type: JobType) -> &'static str {
    match job_type {
        JobType::CellSegmentation => "overlay.png",
        JobType::TissueMask => "tissue_overlay.png",
    }
}

async fn serve_artifact(
    state: AppState,
    user: wsi_core::UserId,
    job_id: String,
    name_for: fn(JobType) -> &'static str,
) -> Result<Response, AppError> {
    let job_id = JobId::new(job_id);
    let job = state.store.get_job(&user, &job_id)?;
    let name = name_for(job.job_type);
    let bytes = state
        .result_store
        .load_artifact(&job_id, name)
        .await
        .map_err(|_| AppError::Store(wsi_core::StoreError::NotFound))?
        .ok_or(AppError::Store(wsi_core::StoreError::NotFound))?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

async fn get_mask_png(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(job_id): Path<String>,
) -> Result<Response, AppError> {
    serve_artifact(state, user, job_id, mask_artifact_name).await
}

async fn get_overlay_png(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(job_id): Path<String>,
) -> Result<Response, AppError> {
    serve_artifact(state, user, job_id, overlay_artifact_name).await
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
