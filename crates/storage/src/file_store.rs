// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use wsi_adapters::{ProgressSidecar, ResultPayload, ResultStore, ResultStoreError};
use wsi_core::{Job, JobId};

/// Writes `outputs/<job_id>/{progress.json,result.json,<artifact>.png}`.
/// Every write lands in a `.tmp` sibling first and is renamed into place,
/// so a reader (the HTTP result endpoints) never observes a partial file.
pub struct FileResultStore {
    root: PathBuf,
}

impl FileResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn job_dir(&self, job_id: &JobId) -> PathBuf {
        self.root.join(job_id.as_str())
    }

    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), ResultStoreError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp_path = path.with_extension(format!(
            "{}.tmp",
            path.extension().and_then(|e| e.to_str()).unwrap_or("tmp")
        ));
        {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
        }
        tokio::fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn save_progress(&self, job: &Job) -> Result<(), ResultStoreError> {
        let sidecar = ProgressSidecar::from(job);
        let bytes = serde_json::to_vec_pretty(&sidecar)?;
        let path = self.job_dir(&job.id).join("progress.json");
        debug!(job_id = %job.id, path = %path.display(), "saving progress sidecar");
        self.write_atomic(&path, &bytes).await
    }

    async fn save_result(
        &self,
        job_id: &JobId,
        payload: &ResultPayload,
    ) -> Result<(), ResultStoreError> {
        let bytes = serde_json::to_vec_pretty(payload)?;
        let path = self.job_dir(job_id).join("result.json");
        debug!(job_id = %job_id, path = %path.display(), "saving result");
        self.write_atomic(&path, &bytes).await
    }

    async fn save_artifact(
        &self,
        job_id: &JobId,
        name: &str,
        png_bytes: &[u8],
    ) -> Result<(), ResultStoreError> {
        let path = self.artifact_path(job_id, name);
        debug!(job_id = %job_id, path = %path.display(), "saving artifact");
        self.write_atomic(&path, png_bytes).await
    }

    fn artifact_path(&self, job_id: &JobId, name: &str) -> PathBuf {
        self.job_dir(job_id).join(name)
    }

    async fn load_result(&self, job_id: &JobId) -> Result<Option<ResultPayload>, ResultStoreError> {
        let path = self.job_dir(job_id).join("result.json");
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_artifact(
        &self,
        job_id: &JobId,
        name: &str,
    ) -> Result<Option<Vec<u8>>, ResultStoreError> {
        let path = self.artifact_path(job_id, name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "file_store_tests.rs"]
mod tests;
