// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake claim adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClaimAdapter, ClaimOutcome};
use sole_core::{ClaimError, Config, Identifier};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// In-memory claim registry. Clones share the registry, so each clone can
/// stand in for a separate process.
#[derive(Clone, Default)]
pub struct FakeClaimAdapter {
    held: Arc<Mutex<HashSet<Identifier>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<Identifier>>>,
}

impl FakeClaimAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following claim fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
    }

    /// Whether any token for `id` is currently held
    pub fn is_held(&self, id: &Identifier) -> bool {
        self.held
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(id)
    }

    /// Identifiers passed to `try_claim`, in call order
    pub fn calls(&self) -> Vec<Identifier> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Token removing its identifier from the registry on drop
#[derive(Debug)]
pub struct FakeClaimToken {
    held: Arc<Mutex<HashSet<Identifier>>>,
    identifier: Identifier,
}

impl Drop for FakeClaimToken {
    fn drop(&mut self) {
        self.held
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.identifier);
    }
}

impl ClaimAdapter for FakeClaimAdapter {
    type Token = FakeClaimToken;

    fn try_claim(&self, config: &Config) -> Result<ClaimOutcome<FakeClaimToken>, ClaimError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(config.identifier.clone());

        if let Some(message) = self
            .failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(ClaimError::Lock(
                config.lock_path.clone(),
                std::io::Error::other(message),
            ));
        }

        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        if !held.insert(config.identifier.clone()) {
            return Ok(ClaimOutcome::Lost);
        }

        Ok(ClaimOutcome::Won(FakeClaimToken {
            held: Arc::clone(&self.held),
            identifier: config.identifier.clone(),
        }))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
