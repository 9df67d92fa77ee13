// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The collaborators one job's execution needs (C6): the shared analyzer
//! singleton, a per-job pyramid factory, and the result sink.

use crate::analyzer_pool::LazyAnalyzer;
use crate::pyramid_factory::PyramidFactory;
use std::sync::Arc;
use wsi_adapters::ResultStore;

pub struct RuntimeDeps {
    pub analyzer: Arc<LazyAnalyzer>,
    pub pyramid_factory: Arc<dyn PyramidFactory>,
    pub result_store: Arc<dyn ResultStore>,
}

impl RuntimeDeps {
    pub fn new(
        analyzer: Arc<LazyAnalyzer>,
        pyramid_factory: Arc<dyn PyramidFactory>,
        result_store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            analyzer,
            pyramid_factory,
            result_store,
        }
    }

    /// Wires the production defaults: a threshold-based stand-in analyzer
    /// (§6.3 note: swap for a real model without touching the runtime),
    /// the file-backed pyramid reader, and the on-disk result store.
    pub fn production(output_dir: impl Into<std::path::PathBuf>) -> Self {
        use wsi_adapters::ThresholdTileAnalyzer;
        use wsi_storage::FileResultStore;

        Self::new(
            Arc::new(LazyAnalyzer::new(|| {
                Arc::new(ThresholdTileAnalyzer::new())
            })),
            Arc::new(crate::pyramid_factory::FileBackedPyramidFactory),
            Arc::new(FileResultStore::new(output_dir)),
        )
    }
}
