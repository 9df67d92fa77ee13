// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The HTTP surface (§6.1): one `Router` per resource, merged into the
//! daemon's top-level app. Each handler is a thin translation from
//! `axum::extract` types to `wsi-core` calls and back to the JSON views in
//! [`crate::views`].

mod jobs;
mod users;
mod workflows;

use crate::state::AppState;
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(workflows::router())
        .merge(jobs::router())
        .merge(users::router())
        .with_state(state)
}
