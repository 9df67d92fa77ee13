// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wsid` — the WSI workflow scheduler daemon.
//!
//! Owns the one `StateStore` for the process, runs the admission scheduler
//! loop (§5) alongside the `axum` HTTP surface (§6.1), and serves saved
//! result artifacts (mask/overlay PNGs) from the output directory directly
//! as static files (§6.4).

use std::sync::Arc;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use wsi_core::{StateStore, SystemClock};
use wsi_daemon::{env, http, state::AppState};
use wsi_engine::{spawn_scheduler_loop, RuntimeDeps, SchedulerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let config = SchedulerConfig::from_env();
    let output_dir = env::output_dir();
    std::fs::create_dir_all(&output_dir)?;

    info!(
        max_workers = config.max_workers,
        max_active_users = config.max_active_users,
        output_dir = %output_dir.display(),
        "starting wsid"
    );

    let store = Arc::new(StateStore::new());
    let deps = Arc::new(RuntimeDeps::production(output_dir.clone()));

    spawn_scheduler_loop(
        Arc::clone(&store),
        Arc::clone(&deps),
        config,
        SystemClock::default(),
    );

    let state = AppState::new(Arc::clone(&store), Arc::clone(&deps.result_store));
    let app = http::router(state)
        .nest_service("/outputs", ServeDir::new(&output_dir))
        .layer(TraceLayer::new_for_http());

    let bind_addr = env::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
