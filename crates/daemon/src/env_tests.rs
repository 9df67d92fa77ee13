// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_when_unset() {
    // Relies on the test harness not setting these vars; override behavior
    // is identical in shape to `wsi_engine::SchedulerConfig::from_env` and
    // isn't re-tested here to avoid cross-test env mutation races.
    if std::env::var("WSI_BIND_ADDR").is_err() {
        assert_eq!(bind_addr(), "0.0.0.0:8080");
    }
    if std::env::var("WSI_OUTPUT_DIR").is_err() {
        assert_eq!(output_dir(), PathBuf::from("outputs"));
    }
}
