// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sole-core: shared types for single-instance coordination
//!
//! This crate provides:
//! - Identifiers and the OS names derived from them
//! - Roles and the events an instance surfaces
//! - The claim/endpoint error taxonomy

pub mod config;
pub mod error;
pub mod event;
pub mod identifier;

pub use config::{Config, RuntimeDir, CONNECT_TIMEOUT_ENV, RUNTIME_DIR_ENV};
pub use error::{ClaimError, EndpointError, InstanceError};
pub use event::{InstanceEvent, Role};
pub use identifier::{Identifier, IdentifierError};
