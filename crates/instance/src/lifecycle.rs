// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instance lifecycle: claim, listen, release

use sole_adapters::{ClaimAdapter, ClaimOutcome, EndpointAdapter};
use sole_core::{Config, InstanceError, InstanceEvent, Role};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::listener;

/// Resources acquired during startup
pub(crate) struct Started<T> {
    pub role: Role,
    pub claim: Option<T>,
    pub listener: Option<JoinHandle<()>>,
}

/// Claim, then listen if the claim was won.
///
/// Never fails: faults are queued on `events` and reflected in the role.
pub(crate) fn startup<C: ClaimAdapter, E: EndpointAdapter>(
    config: &Config,
    claim: &C,
    endpoint: &E,
    events: mpsc::UnboundedSender<InstanceEvent>,
) -> Started<C::Token> {
    let token = match claim.try_claim(config) {
        Ok(ClaimOutcome::Won(token)) => token,
        Ok(ClaimOutcome::Lost) => {
            return Started {
                role: Role::Secondary,
                claim: None,
                listener: None,
            };
        }
        Err(e) => {
            error!(identifier = %config.identifier, error = %e, "claim status unconfirmed");
            report(&events, InstanceError::Claim(e));
            return Started {
                role: Role::Failed,
                claim: None,
                listener: None,
            };
        }
    };

    // Bind LAST - only after the claim is held, so no live owner can exist
    let listener = match endpoint.bind(config) {
        Ok(bound) => Some(listener::spawn(bound, config.identifier.clone(), events)),
        Err(e) => {
            // Still the one true instance; notifications just cannot arrive
            warn!(identifier = %config.identifier, error = %e, "primary without listener");
            report(&events, InstanceError::Listen(e));
            None
        }
    };

    Started {
        role: Role::Primary,
        claim: Some(token),
        listener,
    }
}

/// Stop listening, remove the endpoint name, then give up the claim.
///
/// The endpoint goes first: once the claim is released a successor may bind
/// the same name, and it must not be removed from under it.
pub(crate) fn teardown<T, E: EndpointAdapter>(
    config: &Config,
    endpoint: &E,
    listener: &mut Option<JoinHandle<()>>,
    claim: &mut Option<T>,
) {
    if let Some(task) = listener.take() {
        task.abort();
        if let Err(e) = endpoint.release(config) {
            warn!(identifier = %config.identifier, error = %e, "failed to release endpoint");
        }
    }

    if claim.take().is_some() {
        info!(identifier = %config.identifier, "released primary claim");
    } else {
        debug!(identifier = %config.identifier, "nothing to release");
    }
}

/// Role a new instance would get right now, without listening.
///
/// A won claim is given back immediately.
pub(crate) fn probe<C: ClaimAdapter>(
    config: &Config,
    claim: &C,
) -> Result<Role, InstanceError> {
    match claim.try_claim(config)? {
        ClaimOutcome::Won(token) => {
            drop(token);
            Ok(Role::Primary)
        }
        ClaimOutcome::Lost => Ok(Role::Secondary),
    }
}

fn report(events: &mpsc::UnboundedSender<InstanceEvent>, err: InstanceError) {
    // Receiver lives in the instance being constructed
    let _ = events.send(InstanceEvent::Error(err));
}
