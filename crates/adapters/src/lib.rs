// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the OS-level named resources

pub mod claim;
pub mod endpoint;
#[cfg(unix)]
mod shared;
pub mod traced;

pub use claim::{ClaimAdapter, ClaimOutcome, FileLock, FileLockClaim};
pub use endpoint::{EndpointAdapter, EndpointListener, LocalEndpoint, LocalListener};
pub use traced::{TracedClaim, TracedEndpoint};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use claim::{FakeClaimAdapter, FakeClaimToken};
#[cfg(any(test, feature = "test-support"))]
pub use endpoint::{EndpointCall, FakeEndpointAdapter, FakeListener};
