// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::AppError;
use crate::extract::RequestUser;
use crate::state::AppState;
use crate::views::{WorkflowSpecBody, WorkflowView};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use wsi_core::WorkflowId;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workflows", get(list_workflows).post(create_workflow))
        .route("/workflows/:wf_id", get(get_workflow))
}

async fn create_workflow(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Json(body): Json<WorkflowSpecBody>,
) -> Result<(StatusCode, Json<WorkflowView>), AppError> {
    let spec = body.into();
    let workflow = state
        .store
        .create_workflow(&user, spec, &state.ids, &state.clock)?;
    let jobs = state.store.list_jobs_for_workflow(&user, &workflow.id)?;
    Ok((
        StatusCode::CREATED,
        Json(WorkflowView::build(&workflow, &jobs)),
    ))
}

async fn list_workflows(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
) -> Json<Vec<WorkflowView>> {
    let workflows = state.store.list_workflows_for_user(&user);
    let views = workflows
        .into_iter()
        .map(|wf| {
            let jobs = state
                .store
                .list_jobs_for_workflow(&user, &wf.id)
                .unwrap_or_default();
            WorkflowView::build(&wf, &jobs)
        })
        .collect();
    Json(views)
}

async fn get_workflow(
    State(state): State<AppState>,
    RequestUser(user): RequestUser,
    Path(wf_id): Path<String>,
) -> Result<Json<WorkflowView>, AppError> {
    let wf_id = WorkflowId::new(wf_id);
    let workflow = state.store.get_workflow(&user, &wf_id)?;
    let jobs = state.store.list_jobs_for_workflow(&user, &wf_id)?;
    Ok(Json(WorkflowView::build(&workflow, &jobs)))
}

#[cfg(test)]
#[path = "workflows_tests.rs"]
mod tests;
