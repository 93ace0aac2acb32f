// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instance roles and the events an instance surfaces

use std::fmt;

use serde::Serialize;

use crate::error::InstanceError;

/// Outcome of construction. Set once, never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Won the claim
    Primary,
    /// Lost the claim to a live process
    Secondary,
    /// The claim could not be attempted; treated as secondary
    Failed,
}

impl Role {
    /// True when some other instance may be the primary
    pub fn is_already_running(&self) -> bool {
        !matches!(self, Role::Primary)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Primary => write!(f, "primary"),
            Role::Secondary => write!(f, "secondary"),
            Role::Failed => write!(f, "failed"),
        }
    }
}

/// Event delivered to the instance owner
#[derive(Debug)]
pub enum InstanceEvent {
    /// A secondary signaled presence
    Notified,
    /// A fault while claiming or listening
    Error(InstanceError),
}

impl InstanceEvent {
    pub fn is_notified(&self) -> bool {
        matches!(self, InstanceEvent::Notified)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
