// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sole_core::Identifier;

fn config_in(dir: &Path, id: &str) -> Config {
    Config::in_dir(dir, Identifier::new(id).unwrap())
}

#[test]
fn first_claim_wins() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_in(temp.path(), "app-42");

    let outcome = FileLockClaim::new().try_claim(&config).unwrap();
    assert!(outcome.is_won());
}

#[test]
fn second_claim_loses_while_first_is_held() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_in(temp.path(), "app-42");
    let claim = FileLockClaim::new();

    let first = claim.try_claim(&config).unwrap();
    assert!(first.is_won());

    let second = claim.try_claim(&config).unwrap();
    assert!(matches!(second, ClaimOutcome::Lost));
}

#[test]
fn dropping_token_releases_claim() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_in(temp.path(), "app-42");
    let claim = FileLockClaim::new();

    let first = claim.try_claim(&config).unwrap();
    drop(first);

    let again = claim.try_claim(&config).unwrap();
    assert!(again.is_won());
}

#[test]
fn distinct_identifiers_do_not_contend() {
    let temp = tempfile::tempdir().unwrap();
    let claim = FileLockClaim::new();

    let a = claim.try_claim(&config_in(temp.path(), "app-1")).unwrap();
    let b = claim.try_claim(&config_in(temp.path(), "app-2")).unwrap();
    assert!(a.is_won());
    assert!(b.is_won());
}

#[test]
fn claim_creates_runtime_dir_and_records_pid() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("nested").join("run");
    let config = config_in(&dir, "app-42");

    let outcome = FileLockClaim::new().try_claim(&config).unwrap();
    let ClaimOutcome::Won(token) = outcome else {
        panic!("expected to win the claim");
    };

    assert_eq!(token.path(), config.lock_path);
    let contents = std::fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(contents.trim(), std::process::id().to_string());
}

#[test]
fn lock_file_survives_release() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_in(temp.path(), "app-42");

    drop(FileLockClaim::new().try_claim(&config).unwrap());
    assert!(config.lock_path.exists());
}

#[test]
fn unusable_runtime_dir_is_claim_error() {
    let temp = tempfile::tempdir().unwrap();
    // A regular file where the directory should be
    let blocker = temp.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();
    let config = config_in(&blocker, "app-42");

    let result = FileLockClaim::new().try_claim(&config);
    assert!(matches!(result, Err(ClaimError::CreateDir(..))));
}

#[test]
fn concurrent_claims_have_exactly_one_winner() {
    use std::sync::{Arc, Barrier};

    const ROUNDS: usize = 50;
    const CONTENDERS: usize = 16;

    let temp = tempfile::tempdir().unwrap();
    let config = Arc::new(config_in(temp.path(), "app-42"));

    for round in 0..ROUNDS {
        let barrier = Arc::new(Barrier::new(CONTENDERS));
        let handles: Vec<_> = (0..CONTENDERS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                let config = Arc::clone(&config);
                std::thread::spawn(move || {
                    barrier.wait();
                    FileLockClaim::new().try_claim(&config).unwrap()
                })
            })
            .collect();

        // Tokens stay alive until every contender has tried
        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = outcomes.iter().filter(|o| o.is_won()).count();
        assert_eq!(winners, 1, "round {}: {} winners", round, winners);
    }
}

#[cfg(unix)]
#[test]
fn shared_dir_claim_leaves_files_usable_by_other_users() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("sole");
    let config = config_in(&dir, "app-42").with_shared_dir(true);

    drop(FileLockClaim::new().try_claim(&config).unwrap());

    let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o7777;
    assert_eq!(mode(&dir), 0o1777);
    assert_eq!(mode(&config.lock_path), 0o666);

    // A later claim in the existing directory still wins
    assert!(FileLockClaim::new().try_claim(&config).unwrap().is_won());
}

#[cfg(unix)]
#[test]
fn private_dir_claim_keeps_default_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("sole");
    let config = config_in(&dir, "app-42");

    drop(FileLockClaim::new().try_claim(&config).unwrap());

    let mode = std::fs::metadata(&dir).unwrap().permissions().mode();
    assert_eq!(mode & 0o1000, 0, "private dir must not be sticky");
}
