// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the `wsid` daemon (§6.1). Thin wrapper over `reqwest`:
//! every method sends one request, attaches `X-User-ID` when the client was
//! built with one, and turns a non-2xx response into [`ClientError::Api`].

use crate::error::ClientError;
use serde_json::Value;

pub struct WsiClient {
    http: reqwest::Client,
    base_url: String,
    user: Option<String>,
}

impl WsiClient {
    pub fn new(base_url: impl Into<String>, user: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            user,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn with_user(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.user {
            Some(user) => builder.header("X-User-ID", user),
            None => builder,
        }
    }

    async fn send_json(&self, builder: reqwest::RequestBuilder) -> Result<Value, ClientError> {
        let response = self.with_user(builder).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
        } else {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            Err(ClientError::Api { status, message })
        }
    }

    async fn send_bytes(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, ClientError> {
        let response = self.with_user(builder).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let body = response.text().await?;
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            Err(ClientError::Api { status, message })
        }
    }

    pub async fn create_workflow(&self, spec: Value) -> Result<Value, ClientError> {
        let builder = self.http.post(self.url("/workflows")).json(&spec);
        self.send_json(builder).await
    }

    pub async fn list_workflows(&self) -> Result<Value, ClientError> {
        let builder = self.http.get(self.url("/workflows"));
        self.send_json(builder).await
    }

    pub async fn get_workflow(&self, id: &str) -> Result<Value, ClientError> {
        let builder = self.http.get(self.url(&format!("/workflows/{id}")));
        self.send_json(builder).await
    }

    pub async fn list_jobs_for_workflow(&self, workflow_id: &str) -> Result<Value, ClientError> {
        let builder = self
            .http
            .get(self.url(&format!("/jobs/workflow/{workflow_id}")));
        self.send_json(builder).await
    }

    pub async fn get_job(&self, id: &str) -> Result<Value, ClientError> {
        let builder = self.http.get(self.url(&format!("/jobs/{id}")));
        self.send_json(builder).await
    }

    pub async fn cancel_job(&self, id: &str) -> Result<Value, ClientError> {
        let builder = self.http.post(self.url(&format!("/jobs/{id}/cancel")));
        self.send_json(builder).await
    }

    pub async fn get_result(&self, id: &str) -> Result<Value, ClientError> {
        let builder = self.http.get(self.url(&format!("/jobs/{id}/result")));
        self.send_json(builder).await
    }

    pub async fn get_mask_png(&self, id: &str) -> Result<Vec<u8>, ClientError> {
        let builder = self
            .http
            .get(self.url(&format!("/jobs/{id}/result/mask")));
        self.send_bytes(builder).await
    }

    pub async fn get_overlay_png(&self, id: &str) -> Result<Vec<u8>, ClientError> {
        let builder = self
            .http
            .get(self.url(&format!("/jobs/{id}/result/overlay")));
        self.send_bytes(builder).await
    }

    pub async fn current_user(&self) -> Result<Value, ClientError> {
        let builder = self.http.get(self.url("/users/me"));
        self.send_json(builder).await
    }

    pub async fn active_users(&self) -> Result<Value, ClientError> {
        let builder = self.http.get(self.url("/users/active"));
        self.send_json(builder).await
    }
}
