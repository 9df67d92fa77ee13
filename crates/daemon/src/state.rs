// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared state every HTTP handler sees. The scheduler loop and the HTTP
//! server hold the same `StateStore`/`ResultStore` handles — the daemon is
//! one process wiring one `Arc<StateStore>` into two consumers (§5).

use std::sync::Arc;
use wsi_adapters::ResultStore;
use wsi_core::{StateStore, SystemClock, UuidIdGen};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StateStore>,
    pub ids: UuidIdGen,
    pub clock: SystemClock,
    pub result_store: Arc<dyn ResultStore>,
}

impl AppState {
    pub fn new(store: Arc<StateStore>, result_store: Arc<dyn ResultStore>) -> Self {
        Self {
            store,
            ids: UuidIdGen,
            clock: SystemClock::default(),
            result_store,
        }
    }
}
