// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake endpoint adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{EndpointAdapter, EndpointListener};
use async_trait::async_trait;
use sole_core::{Config, EndpointError};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Recorded endpoint call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointCall {
    Bind { endpoint: PathBuf },
    Connect { endpoint: PathBuf },
    Release { endpoint: PathBuf },
}

type Registry = Arc<Mutex<HashMap<PathBuf, mpsc::UnboundedSender<()>>>>;

/// In-memory endpoint namespace shared between clones
#[derive(Clone, Default)]
pub struct FakeEndpointAdapter {
    bound: Registry,
    fail_bind: Arc<AtomicBool>,
    calls: Arc<Mutex<Vec<EndpointCall>>>,
}

impl FakeEndpointAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following bind fail
    pub fn fail_bind(&self) {
        self.fail_bind.store(true, Ordering::SeqCst);
    }

    /// Whether a listener is currently bound at `endpoint`
    pub fn is_bound(&self, endpoint: &Path) -> bool {
        self.bound
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(endpoint)
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<EndpointCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: EndpointCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

/// Receives one unit per fake connection
#[derive(Debug)]
pub struct FakeListener {
    rx: mpsc::UnboundedReceiver<()>,
}

#[async_trait]
impl EndpointListener for FakeListener {
    async fn accept(&mut self) -> Result<(), EndpointError> {
        match self.rx.recv().await {
            Some(()) => Ok(()),
            // Released: a real listener would simply never see another client
            None => std::future::pending().await,
        }
    }
}

#[async_trait]
impl EndpointAdapter for FakeEndpointAdapter {
    type Listener = FakeListener;

    fn bind(&self, config: &Config) -> Result<FakeListener, EndpointError> {
        self.record(EndpointCall::Bind {
            endpoint: config.endpoint.clone(),
        });

        if self.fail_bind.load(Ordering::SeqCst) {
            return Err(EndpointError::Bind(
                config.endpoint.clone(),
                std::io::Error::new(ErrorKind::PermissionDenied, "injected bind failure"),
            ));
        }

        // Stale entries (listener dropped) are replaced, live ones are not
        let mut bound = self.bound.lock().unwrap_or_else(|e| e.into_inner());
        if bound
            .get(&config.endpoint)
            .is_some_and(|tx| !tx.is_closed())
        {
            return Err(EndpointError::Bind(
                config.endpoint.clone(),
                std::io::Error::from(ErrorKind::AddrInUse),
            ));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        bound.insert(config.endpoint.clone(), tx);
        Ok(FakeListener { rx })
    }

    async fn connect(&self, config: &Config) -> Result<(), EndpointError> {
        self.record(EndpointCall::Connect {
            endpoint: config.endpoint.clone(),
        });

        let delivered = {
            let bound = self.bound.lock().unwrap_or_else(|e| e.into_inner());
            bound
                .get(&config.endpoint)
                .is_some_and(|tx| tx.send(()).is_ok())
        };
        if delivered {
            Ok(())
        } else {
            Err(EndpointError::Connect(
                config.endpoint.clone(),
                std::io::Error::from(ErrorKind::ConnectionRefused),
            ))
        }
    }

    fn release(&self, config: &Config) -> Result<(), EndpointError> {
        self.record(EndpointCall::Release {
            endpoint: config.endpoint.clone(),
        });
        self.bound
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&config.endpoint);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
