// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom extractor for the `X-User-ID` header (§6.1): every endpoint but
//! `GET /users/active` requires it, and a missing header is a `422`, not a
//! `400` — the request is well-formed, it's just missing an assertion the
//! server can't supply on the caller's behalf.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use wsi_core::UserId;

const HEADER_NAME: &str = "x-user-id";

pub struct RequestUser(pub UserId);

#[derive(Serialize)]
struct MissingHeaderBody {
    error: &'static str,
}

pub struct MissingUserHeader;

impl IntoResponse for MissingUserHeader {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(MissingHeaderBody {
                error: "missing X-User-ID header",
            }),
        )
            .into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestUser
where
    S: Send + Sync,
{
    type Rejection = MissingUserHeader;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(HEADER_NAME)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(MissingUserHeader)?;
        Ok(RequestUser(UserId::new(value)))
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
