// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::claim::{ClaimAdapter, ClaimOutcome};
use crate::endpoint::EndpointAdapter;
use async_trait::async_trait;
use sole_core::{ClaimError, Config, EndpointError};
use tracing::Instrument;

/// Wrapper that adds tracing to any ClaimAdapter
#[derive(Clone)]
pub struct TracedClaim<C> {
    inner: C,
}

impl<C> TracedClaim<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: ClaimAdapter> ClaimAdapter for TracedClaim<C> {
    type Token = C::Token;

    fn try_claim(&self, config: &Config) -> Result<ClaimOutcome<C::Token>, ClaimError> {
        let span = tracing::info_span!(
            "claim.try",
            identifier = %config.identifier,
            path = %config.lock_path.display()
        );
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.try_claim(config);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(ClaimOutcome::Won(_)) => tracing::info!(elapsed_ms, "claim won"),
            Ok(ClaimOutcome::Lost) => tracing::info!(elapsed_ms, "claim held elsewhere"),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "claim failed"),
        }

        result
    }
}

/// Wrapper that adds tracing to any EndpointAdapter
#[derive(Clone)]
pub struct TracedEndpoint<E> {
    inner: E,
}

impl<E> TracedEndpoint<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<E: EndpointAdapter> EndpointAdapter for TracedEndpoint<E> {
    type Listener = E::Listener;

    fn bind(&self, config: &Config) -> Result<E::Listener, EndpointError> {
        let span = tracing::info_span!(
            "endpoint.bind",
            identifier = %config.identifier,
            endpoint = %config.endpoint.display()
        );
        let _guard = span.enter();

        let result = self.inner.bind(config);
        match &result {
            Ok(_) => tracing::info!("listening"),
            Err(e) => tracing::error!(error = %e, "bind failed"),
        }
        result
    }

    async fn connect(&self, config: &Config) -> Result<(), EndpointError> {
        let span = tracing::debug_span!(
            "endpoint.connect",
            identifier = %config.identifier,
            endpoint = %config.endpoint.display()
        );

        // Entered guards are !Send; instrument the future instead
        async {
            let start = std::time::Instant::now();
            let result = self.inner.connect(config).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "signaled"),
                Err(e) => tracing::debug!(elapsed_ms, error = %e, "signal not delivered"),
            }
            result
        }
        .instrument(span)
        .await
    }

    fn release(&self, config: &Config) -> Result<(), EndpointError> {
        let span = tracing::info_span!(
            "endpoint.release",
            identifier = %config.identifier,
            endpoint = %config.endpoint.display()
        );
        let _guard = span.enter();

        let result = self.inner.release(config);
        match &result {
            Ok(()) => tracing::debug!("released"),
            Err(e) => tracing::warn!(error = %e, "release failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
