// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for claiming and listening

use std::path::PathBuf;

use thiserror::Error;

/// The claim could not be attempted. Distinct from losing it to another process.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("failed to create runtime directory {0}: {1}")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to open lock file {0}: {1}")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("failed to lock {0}: {1}")]
    Lock(PathBuf, #[source] std::io::Error),
}

/// Errors from the notification endpoint
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("failed to remove stale endpoint {0}: {1}")]
    Stale(PathBuf, #[source] std::io::Error),

    #[error("failed to bind {0}: {1}")]
    Bind(PathBuf, #[source] std::io::Error),

    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),

    #[error("failed to connect to {0}: {1}")]
    Connect(PathBuf, #[source] std::io::Error),

    #[error("timed out connecting to {0}")]
    ConnectTimeout(PathBuf),

    #[error("failed to release {0}: {1}")]
    Release(PathBuf, #[source] std::io::Error),
}

/// Faults surfaced on an instance's event stream
#[derive(Debug, Error)]
pub enum InstanceError {
    /// Claim status unconfirmed; the instance assumes another one may be running
    #[error("unable to claim primary: {0}")]
    Claim(#[from] ClaimError),

    /// Claim held, but notifications cannot be received
    #[error("unable to listen for notifications: {0}")]
    Listen(#[from] EndpointError),
}
