// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Primary claim adapters

mod flock;

pub use flock::{FileLock, FileLockClaim};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeClaimAdapter, FakeClaimToken};

use sole_core::{ClaimError, Config};

/// Result of an atomic create-if-absent attempt
#[derive(Debug)]
pub enum ClaimOutcome<T> {
    /// This caller is the sole holder; dropping the token releases the claim
    Won(T),
    /// Another live process holds the claim
    Lost,
}

impl<T> ClaimOutcome<T> {
    pub fn is_won(&self) -> bool {
        matches!(self, ClaimOutcome::Won(_))
    }
}

/// Adapter for claiming the primary role of a coordination group
pub trait ClaimAdapter: Clone + Send + Sync + 'static {
    /// Held by the primary for as long as it lives
    type Token: Send + 'static;

    /// Attempt the claim. Never blocks waiting for the current holder.
    ///
    /// At most one concurrent caller per identifier observes `Won`.
    fn try_claim(&self, config: &Config) -> Result<ClaimOutcome<Self::Token>, ClaimError>;
}
