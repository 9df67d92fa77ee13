// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `TileAnalyzer` singleton (§5, §9): lazily constructed exactly once
//! per process, behind a one-shot initialization primitive rather than a
//! double-checked mutex, so the scheduler loop never pays first-use latency
//! — only the worker that first touches the analyzer does.

use std::sync::Arc;
use tokio::sync::OnceCell;
use wsi_adapters::TileAnalyzer;

type Factory = Box<dyn Fn() -> Arc<dyn TileAnalyzer> + Send + Sync>;

pub struct LazyAnalyzer {
    cell: OnceCell<Arc<dyn TileAnalyzer>>,
    factory: Factory,
}

impl LazyAnalyzer {
    pub fn new(factory: impl Fn() -> Arc<dyn TileAnalyzer> + Send + Sync + 'static) -> Self {
        Self {
            cell: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// Returns the shared instance, constructing it on first call. Callers
    /// that race here block on the same `OnceCell`; none constructs twice.
    pub async fn get(&self) -> Arc<dyn TileAnalyzer> {
        self.cell
            .get_or_init(|| async { (self.factory)() })
            .await
            .clone()
    }
}

#[cfg(test)]
#[path = "analyzer_pool_tests.rs"]
mod tests;
