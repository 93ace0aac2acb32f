// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-process single-instance guard

use sole_adapters::{
    ClaimAdapter, EndpointAdapter, FileLockClaim, LocalEndpoint, TracedClaim, TracedEndpoint,
};
use sole_core::{Config, Identifier, InstanceError, InstanceEvent, Role};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::lifecycle;

/// Instance with concrete adapter types (wrapped with tracing)
pub type SingleInstance = Instance<TracedClaim<FileLockClaim>, TracedEndpoint<LocalEndpoint>>;

/// One process's view of its coordination group.
///
/// The role is decided during construction and never changes. Dropping the
/// instance (or calling [`Instance::shutdown`]) stops listening and releases
/// the claim.
pub struct Instance<C: ClaimAdapter, E: EndpointAdapter> {
    config: Config,
    role: Role,
    endpoint: E,
    listener: Option<JoinHandle<()>>,
    claim: Option<C::Token>,
    events: mpsc::UnboundedReceiver<InstanceEvent>,
}

impl SingleInstance {
    /// Claim or join the group named by `identifier`.
    ///
    /// Paths follow the environment (`SOLE_RUNTIME_DIR`, `SOLE_CONNECT_TIMEOUT_MS`).
    /// Empty identifiers are refused earlier, by [`Identifier::new`].
    pub async fn new(identifier: Identifier) -> Self {
        Self::with_config(Config::for_identifier(identifier)).await
    }

    pub async fn with_config(config: Config) -> Self {
        Instance::with_adapters(
            config,
            TracedClaim::new(FileLockClaim::new()),
            TracedEndpoint::new(LocalEndpoint::new()),
        )
        .await
    }

    /// Report whether a primary is running, without binding or keeping anything
    pub fn probe(config: &Config) -> Result<Role, InstanceError> {
        Self::probe_with(config, &TracedClaim::new(FileLockClaim::new()))
    }
}

impl<C: ClaimAdapter, E: EndpointAdapter> Instance<C, E> {
    /// Role a new instance would get. A won claim is released before returning,
    /// so the answer can be stale by the time the caller reads it.
    pub fn probe_with(config: &Config, claim: &C) -> Result<Role, InstanceError> {
        lifecycle::probe(config, claim)
    }

    /// Construct with explicit adapters. Must run inside a tokio runtime: the
    /// primary's accept loop is spawned onto it.
    ///
    /// Never fails. Faults are the first events on the stream.
    pub async fn with_adapters(config: Config, claim: C, endpoint: E) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let started = lifecycle::startup(&config, &claim, &endpoint, tx);

        info!(
            identifier = %config.identifier,
            role = %started.role,
            listening = started.listener.is_some(),
            "instance started"
        );

        Self {
            config,
            role: started.role,
            endpoint,
            listener: started.listener,
            claim: started.claim,
            events,
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.config.identifier
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// True iff another instance may be the primary (claim lost or errored)
    pub fn is_already_running(&self) -> bool {
        self.role.is_already_running()
    }

    /// True for a primary whose listener is up
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Tell the primary that another launch happened.
    ///
    /// No-op on the primary itself. Delivery failures (no primary, refused,
    /// timed out) are logged and otherwise ignored.
    pub async fn notify(&self) {
        if self.role == Role::Primary {
            debug!(identifier = %self.config.identifier, "primary does not notify itself");
            return;
        }

        if let Err(e) = self.endpoint.connect(&self.config).await {
            debug!(identifier = %self.config.identifier, error = %e, "notification dropped");
        }
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once no further event can arrive: always after queued
    /// startup faults on a non-listening instance, never while listening.
    pub async fn next_event(&mut self) -> Option<InstanceEvent> {
        self.events.recv().await
    }

    /// Take the next event if one is already queued
    pub fn try_next_event(&mut self) -> Option<InstanceEvent> {
        self.events.try_recv().ok()
    }

    /// Stop listening and release the claim now rather than at drop
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        lifecycle::teardown(
            &self.config,
            &self.endpoint,
            &mut self.listener,
            &mut self.claim,
        );
    }
}

impl<C: ClaimAdapter, E: EndpointAdapter> Drop for Instance<C, E> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<C: ClaimAdapter, E: EndpointAdapter> std::fmt::Debug for Instance<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("identifier", &self.config.identifier)
            .field("role", &self.role)
            .field("listening", &self.is_listening())
            .finish()
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
