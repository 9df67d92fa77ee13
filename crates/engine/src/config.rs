// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide admission tunables (§4.4): `MaxWorkers`, `MaxActiveUsers`,
//! `SchedulerInterval`. Defaults match the spec; overridable via
//! environment variables read once at daemon startup, the same
//! environment-variable-overrides-default shape the teacher uses for its
//! own process config.

use std::time::Duration;

const DEFAULT_MAX_WORKERS: usize = 4;
const DEFAULT_MAX_ACTIVE_USERS: usize = 3;
const DEFAULT_SCHEDULER_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub max_workers: usize,
    pub max_active_users: usize,
    pub scheduler_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            max_active_users: DEFAULT_MAX_ACTIVE_USERS,
            scheduler_interval: Duration::from_millis(DEFAULT_SCHEDULER_INTERVAL_MS),
        }
    }
}

impl SchedulerConfig {
    /// Start from defaults, overriding any field whose environment
    /// variable is set and parses.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(n) = env_usize("WSI_MAX_WORKERS") {
            config.max_workers = n;
        }
        if let Some(n) = env_usize("WSI_MAX_ACTIVE_USERS") {
            config.max_active_users = n;
        }
        if let Some(ms) = env_u64("WSI_SCHEDULER_INTERVAL_MS") {
            config.scheduler_interval = Duration::from_millis(ms);
        }
        config
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = SchedulerConfig::default();
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.max_active_users, 3);
        assert_eq!(config.scheduler_interval, Duration::from_millis(500));
    }
}
