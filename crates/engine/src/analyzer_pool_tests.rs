// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use wsi_adapters::FakeTileAnalyzer;

#[tokio::test]
async fn constructs_exactly_once_across_concurrent_callers() {
    let constructions = Arc::new(AtomicUsize::new(0));
    let counted = constructions.clone();
    let lazy = Arc::new(LazyAnalyzer::new(move || {
        counted.fetch_add(1, Ordering::SeqCst);
        Arc::new(FakeTileAnalyzer::new()) as Arc<dyn TileAnalyzer>
    }));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let lazy = lazy.clone();
        handles.push(tokio::spawn(async move {
            lazy.get().await;
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(constructions.load(Ordering::SeqCst), 1);
}
