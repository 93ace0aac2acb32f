// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sole-instance: single-instance guard for applications
//!
//! Processes constructed with the same [`Identifier`] agree on exactly one
//! primary. Later processes find out they are [`Role::Secondary`] and can
//! [`Instance::notify`] the primary, which observes [`InstanceEvent::Notified`].
//!
//! ```no_run
//! # async fn run() -> Result<(), sole_instance::IdentifierError> {
//! use sole_instance::{Identifier, InstanceEvent, SingleInstance};
//!
//! let mut instance = SingleInstance::new(Identifier::new("com.example.editor")?).await;
//! if instance.is_already_running() {
//!     instance.notify().await;
//!     return Ok(());
//! }
//! while let Some(event) = instance.next_event().await {
//!     if let InstanceEvent::Notified = event {
//!         // bring the window to front
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod instance;
mod lifecycle;
mod listener;

pub use instance::{Instance, SingleInstance};
pub use sole_core::{
    Config, Identifier, IdentifierError, InstanceError, InstanceEvent, Role, CONNECT_TIMEOUT_ENV,
    RUNTIME_DIR_ENV,
};
