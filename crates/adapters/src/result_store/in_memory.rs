// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory `ResultStore` for tests: no filesystem, everything lives in a
//! mutex-guarded map.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProgressSidecar, ResultPayload, ResultStore, ResultStoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use wsi_core::{Job, JobId};

#[derive(Default)]
struct Inner {
    progress: HashMap<JobId, ProgressSidecar>,
    results: HashMap<JobId, ResultPayload>,
    artifacts: HashMap<(JobId, String), Vec<u8>>,
}

#[derive(Clone, Default)]
pub struct InMemoryResultStore {
    inner: std::sync::Arc<Mutex<Inner>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress_for(&self, job_id: &JobId) -> Option<ProgressSidecar> {
        self.inner.lock().progress.get(job_id).cloned()
    }

    pub fn artifact_bytes(&self, job_id: &JobId, name: &str) -> Option<Vec<u8>> {
        self.inner
            .lock()
            .artifacts
            .get(&(job_id.clone(), name.to_string()))
            .cloned()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn save_progress(&self, job: &Job) -> Result<(), ResultStoreError> {
        self.inner
            .lock()
            .progress
            .insert(job.id.clone(), ProgressSidecar::from(job));
        Ok(())
    }

    async fn save_result(
        &self,
        job_id: &JobId,
        payload: &ResultPayload,
    ) -> Result<(), ResultStoreError> {
        self.inner
            .lock()
            .results
            .insert(job_id.clone(), payload.clone());
        Ok(())
    }

    async fn save_artifact(
        &self,
        job_id: &JobId,
        name: &str,
        png_bytes: &[u8],
    ) -> Result<(), ResultStoreError> {
        self.inner
            .lock()
            .artifacts
            .insert((job_id.clone(), name.to_string()), png_bytes.to_vec());
        Ok(())
    }

    fn artifact_path(&self, job_id: &JobId, name: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}/{}", job_id.as_str(), name))
    }

    async fn load_result(&self, job_id: &JobId) -> Result<Option<ResultPayload>, ResultStoreError> {
        Ok(self.inner.lock().results.get(job_id).cloned())
    }

    async fn load_artifact(
        &self,
        job_id: &JobId,
        name: &str,
    ) -> Result<Option<Vec<u8>>, ResultStoreError> {
        Ok(self.artifact_bytes(job_id, name))
    }
}

#[cfg(test)]
#[path = "in_memory_tests.rs"]
mod tests;
