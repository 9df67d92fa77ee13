// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps §7's error kinds onto HTTP status codes at the one seam that needs
//! to know about transport at all.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use wsi_core::StoreError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    /// §6.1 `GET /jobs/{id}/result`: the job exists but never produced a
    /// `result.json` (still running, or failed before writing one).
    NotFinished,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Store(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "not found".to_string())
            }
            AppError::Store(StoreError::InvalidSpec(msg)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg)
            }
            AppError::Store(StoreError::NotCancellable) => (
                StatusCode::BAD_REQUEST,
                "job is not cancellable in its current status".to_string(),
            ),
            AppError::NotFinished => (
                StatusCode::BAD_REQUEST,
                "job has not finished".to_string(),
            ),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
