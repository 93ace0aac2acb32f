// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn config(id: &str) -> Config {
    Config::in_dir("/nonexistent", Identifier::new(id).unwrap())
}

#[test]
fn fake_claim_is_exclusive_across_clones() {
    let first = FakeClaimAdapter::new();
    let second = first.clone();

    let won = first.try_claim(&config("app")).unwrap();
    assert!(won.is_won());
    assert!(matches!(
        second.try_claim(&config("app")).unwrap(),
        ClaimOutcome::Lost
    ));

    drop(won);
    assert!(!first.is_held(&Identifier::new("app").unwrap()));
    assert!(second.try_claim(&config("app")).unwrap().is_won());
}

#[test]
fn fake_claim_injects_failure() {
    let adapter = FakeClaimAdapter::new();
    adapter.fail_with("no shared memory left");

    let err = adapter.try_claim(&config("app")).unwrap_err();
    assert!(err.to_string().contains("no shared memory left"));
    assert_eq!(adapter.calls().len(), 1);
}
