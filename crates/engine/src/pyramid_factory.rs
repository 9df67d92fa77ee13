// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `PyramidImage::open` takes `Self: Sized`, so the trait itself can't be
//! boxed as `dyn PyramidImage` for construction — only for use once opened.
//! This factory seam is how the runtime stays generic over which concrete
//! pyramid backend a job opens, one handle per job, never shared across
//! workers (§5).

use async_trait::async_trait;
use std::path::Path;
use wsi_adapters::{FileBackedPyramid, PyramidError, PyramidImage};

#[async_trait]
pub trait PyramidFactory: Send + Sync + 'static {
    async fn open(&self, path: &Path) -> Result<Box<dyn PyramidImage>, PyramidError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileBackedPyramidFactory;

#[async_trait]
impl PyramidFactory for FileBackedPyramidFactory {
    async fn open(&self, path: &Path) -> Result<Box<dyn PyramidImage>, PyramidError> {
        let pyramid = FileBackedPyramid::open(path).await?;
        Ok(Box::new(pyramid))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use wsi_adapters::FakePyramidImage;

    /// Hands out clones of a fixed in-memory pyramid regardless of the
    /// requested path, for tests that don't want real files on disk.
    #[derive(Clone)]
    pub struct FakePyramidFactory {
        image: FakePyramidImage,
    }

    impl FakePyramidFactory {
        pub fn new(image: FakePyramidImage) -> Self {
            Self { image }
        }
    }

    #[async_trait]
    impl PyramidFactory for FakePyramidFactory {
        async fn open(&self, _path: &Path) -> Result<Box<dyn PyramidImage>, PyramidError> {
            Ok(Box::new(self.image.clone()))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePyramidFactory;

#[cfg(test)]
#[path = "pyramid_factory_tests.rs"]
mod tests;
