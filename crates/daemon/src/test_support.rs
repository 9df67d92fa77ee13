// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the HTTP handler test modules: build an in-process
//! router over fakes and drive it with `tower::ServiceExt::oneshot`
//! instead of binding a real socket.

use crate::state::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wsi_adapters::InMemoryResultStore;
use wsi_core::StateStore;

pub(crate) fn test_app() -> (Router, AppState) {
    let store = Arc::new(StateStore::new());
    let result_store: Arc<dyn wsi_adapters::ResultStore> = Arc::new(InMemoryResultStore::new());
    let state = AppState::new(store, result_store);
    (crate::http::router(state.clone()), state)
}

pub(crate) async fn request(
    app: Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-User-ID", user);
    }
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
