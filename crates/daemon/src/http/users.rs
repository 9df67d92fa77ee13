// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::extract::RequestUser;
use crate::state::AppState;
use crate::views::{ActiveUsersView, CurrentUserView};
use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(current_user))
        .route("/users/active", get(active_users))
}

async fn current_user(RequestUser(user): RequestUser) -> Json<CurrentUserView> {
    Json(CurrentUserView { user_id: user })
}

async fn active_users(State(state): State<AppState>) -> Json<ActiveUsersView> {
    Json(state.store.active_users_snapshot().into())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
