// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification endpoint adapters
//!
//! A connection is the whole message: the listener never reads from an
//! accepted stream, and the client never writes to one.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::{LocalEndpoint, LocalListener};

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::{LocalEndpoint, LocalListener};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{EndpointCall, FakeEndpointAdapter, FakeListener};

use async_trait::async_trait;
use sole_core::{Config, EndpointError};

/// Bound endpoint owned by the primary
#[async_trait]
pub trait EndpointListener: Send + 'static {
    /// Wait for the next incoming connection. One completed call is one notification.
    async fn accept(&mut self) -> Result<(), EndpointError>;
}

/// Adapter for the named local endpoint of a coordination group
#[async_trait]
pub trait EndpointAdapter: Clone + Send + Sync + 'static {
    type Listener: EndpointListener;

    /// Bind the endpoint, clearing any artifact a crashed owner left behind.
    ///
    /// Only call while holding the claim: no live owner can exist then.
    fn bind(&self, config: &Config) -> Result<Self::Listener, EndpointError>;

    /// Open a connection and close it straight away
    async fn connect(&self, config: &Config) -> Result<(), EndpointError>;

    /// Remove the endpoint's name so no further connection can reach it
    fn release(&self, config: &Config) -> Result<(), EndpointError>;
}
