// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for multi-process CLI tests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader};
use std::process::{Child, ExitStatus, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use sole_instance::{Config, Identifier};
use tempfile::TempDir;

/// How long any single step may take before the test fails
pub const STEP_TIMEOUT: Duration = Duration::from_secs(10);

/// Isolated runtime directory and a fresh identifier
pub struct Sandbox {
    pub dir: TempDir,
    pub id: String,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            id: format!("{{{}}}", uuid::Uuid::new_v4()),
        }
    }

    /// `sole` command bound to this sandbox
    pub fn sole(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_sole"));
        cmd.env("SOLE_RUNTIME_DIR", self.dir.path())
            .env_remove("RUST_LOG")
            .timeout(STEP_TIMEOUT);
        cmd
    }

    /// Names the `sole` processes in this sandbox resolve to
    pub fn config(&self) -> Config {
        Config::in_dir(
            self.dir.path(),
            Identifier::new(self.id.clone()).expect("non-empty identifier"),
        )
    }

    /// Start `sole run` in the background and wait until it reports `primary`
    pub fn spawn_primary(&self, exit_after: Option<usize>) -> Background {
        let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_sole"));
        cmd.env("SOLE_RUNTIME_DIR", self.dir.path())
            .env_remove("RUST_LOG")
            .args(["run", &self.id])
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(n) = exit_after {
            cmd.args(["--exit-after", &n.to_string()]);
        }

        let mut background = Background::spawn(cmd);
        background.expect_line("primary");
        background
    }
}

/// Long-running `sole` process whose stdout is read line by line
pub struct Background {
    child: Child,
    lines: mpsc::Receiver<String>,
}

impl Background {
    fn spawn(mut cmd: std::process::Command) -> Self {
        let mut child = cmd.spawn().expect("Failed to spawn sole");
        let stdout = child.stdout.take().expect("stdout is piped");

        let (tx, lines) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self { child, lines }
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Next stdout line must be `expected`
    pub fn expect_line(&mut self, expected: &str) {
        let line = self
            .lines
            .recv_timeout(STEP_TIMEOUT)
            .unwrap_or_else(|e| panic!("no line (wanted {:?}): {}", expected, e));
        assert_eq!(line, expected);
    }

    /// No further stdout line shows up within `quiet`
    pub fn expect_no_line(&mut self, quiet: Duration) {
        if let Ok(line) = self.lines.recv_timeout(quiet) {
            panic!("unexpected line: {:?}", line);
        }
    }

    /// Wait for the process to exit on its own
    pub fn wait(mut self) -> ExitStatus {
        let start = Instant::now();
        loop {
            if let Some(status) = self.child.try_wait().expect("try_wait failed") {
                return status;
            }
            assert!(start.elapsed() < STEP_TIMEOUT, "process did not exit");
            std::thread::sleep(Duration::from_millis(20));
        }
    }

    /// Kill without any chance to clean up, like a crash
    pub fn crash(mut self) {
        self.child.kill().expect("kill failed");
        let _ = self.child.wait();
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
