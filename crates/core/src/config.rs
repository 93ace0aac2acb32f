// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Names and paths derived from an identifier

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::identifier::Identifier;

/// Overrides the directory holding lock files and sockets
pub const RUNTIME_DIR_ENV: &str = "SOLE_RUNTIME_DIR";

/// Upper bound for one notification connect attempt, in milliseconds
pub const CONNECT_TIMEOUT_ENV: &str = "SOLE_CONNECT_TIMEOUT_MS";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Resolved OS names for one coordination group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Caller-supplied identifier
    pub identifier: Identifier,
    /// Directory holding the lock file (and the socket on unix)
    pub runtime_dir: PathBuf,
    /// `runtime_dir` is the system temp fallback, shared by every user
    pub shared_dir: bool,
    /// Path to the claim lock file
    pub lock_path: PathBuf,
    /// Notification endpoint: socket path on unix, pipe name on windows
    pub endpoint: PathBuf,
    /// Bound on a single notify connect
    pub connect_timeout: Duration,
}

impl Config {
    /// Resolve names from the environment
    pub fn for_identifier(identifier: Identifier) -> Self {
        let dir = runtime_dir_from(std::env::var_os(RUNTIME_DIR_ENV).map(PathBuf::from));
        let timeout = parse_duration_ms(CONNECT_TIMEOUT_ENV).unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        Self::in_dir(dir.path, identifier)
            .with_shared_dir(dir.shared)
            .with_connect_timeout(timeout)
    }

    /// Lay out names under an explicit directory, ignoring the environment
    pub fn in_dir(dir: impl Into<PathBuf>, identifier: Identifier) -> Self {
        let runtime_dir = dir.into();
        let name = identifier.namespaced();

        Self {
            lock_path: runtime_dir.join(format!("{}.lock", name)),
            endpoint: endpoint_for(&runtime_dir, &name),
            runtime_dir,
            shared_dir: false,
            identifier,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Mark the directory as shared between users, so files created in it
    /// stay usable by everyone
    pub fn with_shared_dir(mut self, shared: bool) -> Self {
        self.shared_dir = shared;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[cfg(unix)]
fn endpoint_for(runtime_dir: &Path, name: &str) -> PathBuf {
    runtime_dir.join(format!("{}.sock", name))
}

// Named pipes live in a kernel namespace, not in the runtime directory
#[cfg(windows)]
fn endpoint_for(_runtime_dir: &Path, name: &str) -> PathBuf {
    PathBuf::from(format!(r"\\.\pipe\{}", name))
}

/// Where lock files and sockets live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeDir {
    pub path: PathBuf,
    /// True for the system temp fallback, which every user resolves to
    pub shared: bool,
}

/// Pick the runtime directory: explicit override, then the XDG runtime dir,
/// then the system temp dir.
pub fn runtime_dir_from(override_dir: Option<PathBuf>) -> RuntimeDir {
    runtime_dir_with(override_dir, dirs::runtime_dir())
}

fn runtime_dir_with(override_dir: Option<PathBuf>, xdg_dir: Option<PathBuf>) -> RuntimeDir {
    if let Some(path) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return RuntimeDir {
            path,
            shared: false,
        };
    }
    match xdg_dir {
        Some(dir) => RuntimeDir {
            path: dir.join("sole"),
            shared: false,
        },
        None => RuntimeDir {
            path: std::env::temp_dir().join("sole"),
            shared: true,
        },
    }
}

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
