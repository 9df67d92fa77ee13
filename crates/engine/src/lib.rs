// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The Tiled Job Runtime (C3), Admission Scheduler (C4), and Job Lifecycle
//! Controller (C5) — the core of the core. The admission predicate itself
//! ([`wsi_core::StateStore::schedule_once`]) lives in `wsi-core`; this crate
//! owns the periodic loop that drives it, the per-job tile pipeline, and the
//! lifecycle wrapper that guarantees slot release on every exit path.

mod analyzer_pool;
mod components;
mod config;
mod error;
mod lifecycle;
mod params;
mod pyramid_factory;
mod render;
mod runtime_deps;
mod scheduler_loop;
mod tile_runtime;

pub use analyzer_pool::LazyAnalyzer;
pub use config::SchedulerConfig;
pub use error::EngineError;
pub use lifecycle::spawn_job;
pub use pyramid_factory::{FileBackedPyramidFactory, PyramidFactory};
pub use runtime_deps::RuntimeDeps;
pub use scheduler_loop::spawn_scheduler_loop;
pub use tile_runtime::run_job;

#[cfg(any(test, feature = "test-support"))]
pub use pyramid_factory::FakePyramidFactory;
