// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Accept loop turning connections into notifications

use std::time::Duration;

use sole_adapters::EndpointListener;
use sole_core::{Identifier, InstanceError, InstanceEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Pause after a failed accept so a persistent fault cannot spin the loop
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// Run the accept loop on the current runtime.
///
/// The loop ends when the event receiver is dropped or the task is aborted.
pub(crate) fn spawn<L: EndpointListener>(
    listener: L,
    identifier: Identifier,
    events: mpsc::UnboundedSender<InstanceEvent>,
) -> JoinHandle<()> {
    tokio::spawn(accept_loop(listener, identifier, events))
}

async fn accept_loop<L: EndpointListener>(
    mut listener: L,
    identifier: Identifier,
    events: mpsc::UnboundedSender<InstanceEvent>,
) {
    loop {
        match listener.accept().await {
            Ok(()) => {
                debug!(identifier = %identifier, "notified");
                if events.send(InstanceEvent::Notified).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "accept failed");
                if events
                    .send(InstanceEvent::Error(InstanceError::Listen(e)))
                    .is_err()
                {
                    break;
                }
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
    debug!(identifier = %identifier, "accept loop stopped");
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
