// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sole status` reports without disturbing the primary.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use std::time::Duration;

use common::Sandbox;
use predicates::prelude::*;

#[test]
fn status_without_primary_is_not_running() {
    let sandbox = Sandbox::new();

    sandbox
        .sole()
        .args(["status", &sandbox.id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: not running"))
        .stdout(predicate::str::contains(format!("Identifier: {}", sandbox.id)));

    // The probe gave its claim back
    sandbox
        .sole()
        .args(["run", &sandbox.id, "--exit-after", "0"])
        .assert()
        .success()
        .stdout("primary\n");
}

#[test]
fn status_json_while_primary_runs() {
    let sandbox = Sandbox::new();
    let mut primary = sandbox.spawn_primary(None);

    let output = sandbox
        .sole()
        .args(["--format", "json", "status", &sandbox.id])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["identifier"], sandbox.id.as_str());
    assert_eq!(value["role"], "secondary");
    assert_eq!(value["already_running"], true);
    assert_eq!(
        value["lock_path"],
        sandbox.config().lock_path.to_string_lossy().into_owned()
    );

    // A status probe is not a notification
    primary.expect_no_line(Duration::from_millis(300));
}
