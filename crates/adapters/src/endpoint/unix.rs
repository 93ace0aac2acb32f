// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unix domain socket endpoint

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use sole_core::{Config, EndpointError};
use tokio::net::{UnixListener, UnixStream};

use super::{EndpointAdapter, EndpointListener};
use crate::shared;

/// Socket at `<runtime_dir>/sole-<hash>.sock`
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalEndpoint;

impl LocalEndpoint {
    pub fn new() -> Self {
        Self
    }
}

/// Bound unix socket
#[derive(Debug)]
pub struct LocalListener {
    listener: UnixListener,
}

#[async_trait]
impl EndpointListener for LocalListener {
    async fn accept(&mut self) -> Result<(), EndpointError> {
        let (stream, _) = self.listener.accept().await.map_err(EndpointError::Accept)?;
        // Payload, if any, is ignored
        drop(stream);
        Ok(())
    }
}

#[async_trait]
impl EndpointAdapter for LocalEndpoint {
    type Listener = LocalListener;

    fn bind(&self, config: &Config) -> Result<LocalListener, EndpointError> {
        let path = &config.endpoint;
        if remove_if_present(path).map_err(|e| EndpointError::Stale(path.clone(), e))? {
            tracing::debug!(path = %path.display(), "removed stale socket");
        }

        let listener = UnixListener::bind(path).map_err(|e| EndpointError::Bind(path.clone(), e))?;
        // Connecting needs write access to the socket file
        if config.shared_dir {
            if let Err(e) = shared::open_up_path(path) {
                tracing::warn!(path = %path.display(), error = %e, "socket not reachable by other users");
            }
        }
        Ok(LocalListener { listener })
    }

    async fn connect(&self, config: &Config) -> Result<(), EndpointError> {
        let path = &config.endpoint;
        match tokio::time::timeout(config.connect_timeout, UnixStream::connect(path)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Ok(())
            }
            Ok(Err(e)) => Err(EndpointError::Connect(path.clone(), e)),
            Err(_) => Err(EndpointError::ConnectTimeout(path.clone())),
        }
    }

    fn release(&self, config: &Config) -> Result<(), EndpointError> {
        remove_if_present(&config.endpoint)
            .map(|_| ())
            .map_err(|e| EndpointError::Release(config.endpoint.clone(), e))
    }
}

fn remove_if_present(path: &Path) -> std::io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "unix_tests.rs"]
mod tests;
