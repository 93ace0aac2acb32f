// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;
use sole_instance::{Identifier, Role};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format.
///
/// Flushes stdout: a supervising process reads these lines while we keep running.
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    if let Some(line) = render(value, format) {
        println!("{}", line);
        let _ = std::io::stdout().flush();
    }
}

fn render<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Text => Some(value.to_string()),
        OutputFormat::Json => serde_json::to_string(value).ok(),
    }
}

/// Lifecycle line emitted by `run` and `notify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Line {
    /// This process holds the claim
    Primary,
    /// Another process holds the claim
    AlreadyRunning,
    /// A secondary signaled presence
    Notified,
    /// Notification sent towards the primary
    Sent,
    /// Nothing to notify: this process would have been the primary
    NoPrimary,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Line::Primary => "primary",
            Line::AlreadyRunning => "already running",
            Line::Notified => "notified",
            Line::Sent => "sent",
            Line::NoPrimary => "no primary running",
        };
        f.write_str(text)
    }
}

/// Snapshot reported by `status`. `role` is the one a new instance would get.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub identifier: Identifier,
    pub role: Role,
    pub already_running: bool,
    pub lock_path: PathBuf,
    pub endpoint: PathBuf,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Identifier: {}", self.identifier)?;
        writeln!(
            f,
            "Status: {}",
            if self.already_running {
                "running"
            } else {
                "not running"
            }
        )?;
        writeln!(f, "Role: {}", self.role)?;
        writeln!(f, "Lock: {}", self.lock_path.display())?;
        write!(f, "Endpoint: {}", self.endpoint.display())
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
