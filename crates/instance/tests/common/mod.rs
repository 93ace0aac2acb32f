// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for real-adapter integration tests.

#![allow(dead_code)]

use std::time::Duration;

use sole_instance::{Config, Identifier, SingleInstance};
use tempfile::TempDir;

/// Generate an identifier no other test (or stray process) uses
pub fn unique_identifier() -> Identifier {
    Identifier::new(format!("{{{}}}", uuid::Uuid::new_v4())).expect("non-empty identifier")
}

/// Isolated runtime directory plus one identifier
pub struct Group {
    pub dir: TempDir,
    pub identifier: Identifier,
}

impl Group {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            identifier: unique_identifier(),
        }
    }

    pub fn config(&self) -> Config {
        Config::in_dir(self.dir.path(), self.identifier.clone())
    }

    /// Construct an instance as a freshly launched process would
    pub async fn launch(&self) -> SingleInstance {
        SingleInstance::with_config(self.config()).await
    }
}

/// Wait up to 5 seconds for a notification
pub async fn expect_notified(instance: &mut SingleInstance) {
    let event = tokio::time::timeout(Duration::from_secs(5), instance.next_event())
        .await
        .expect("no notification within 5s")
        .expect("event stream closed");
    assert!(event.is_notified(), "unexpected event: {:?}", event);
}

/// Assert nothing else is queued after giving stragglers a moment
pub async fn expect_quiet(instance: &mut SingleInstance) {
    tokio::time::sleep(Duration::from_millis(200)).await;
    if let Some(event) = instance.try_next_event() {
        panic!("unexpected event: {:?}", event);
    }
}
