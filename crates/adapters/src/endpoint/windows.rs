// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named pipe endpoint

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use sole_core::{Config, EndpointError};
use tokio::net::windows::named_pipe::{ClientOptions, NamedPipeServer, ServerOptions};

use super::{EndpointAdapter, EndpointListener};

// winerror.h
const ERROR_PIPE_BUSY: i32 = 231;
const ERROR_NO_DATA: i32 = 232;

const BUSY_RETRY: Duration = Duration::from_millis(10);

/// Pipe at `\\.\pipe\sole-<hash>`
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalEndpoint;

impl LocalEndpoint {
    pub fn new() -> Self {
        Self
    }
}

/// Pipe server waiting for the next client
#[derive(Debug)]
pub struct LocalListener {
    name: PathBuf,
    server: NamedPipeServer,
}

#[async_trait]
impl EndpointListener for LocalListener {
    async fn accept(&mut self) -> Result<(), EndpointError> {
        match self.server.connect().await {
            Ok(()) => {}
            // Client opened and closed before we got to it: still one notification
            Err(e) if e.raw_os_error() == Some(ERROR_NO_DATA) => {}
            Err(e) => return Err(EndpointError::Accept(e)),
        }

        // Next instance must exist before the connected one goes away
        let next = ServerOptions::new()
            .create(&self.name)
            .map_err(EndpointError::Accept)?;
        let connected = std::mem::replace(&mut self.server, next);
        drop(connected);
        Ok(())
    }
}

#[async_trait]
impl EndpointAdapter for LocalEndpoint {
    type Listener = LocalListener;

    // Pipe names vanish with their last handle; nothing stale to clear
    fn bind(&self, config: &Config) -> Result<LocalListener, EndpointError> {
        let server = ServerOptions::new()
            .first_pipe_instance(true)
            .create(&config.endpoint)
            .map_err(|e| EndpointError::Bind(config.endpoint.clone(), e))?;

        Ok(LocalListener {
            name: config.endpoint.clone(),
            server,
        })
    }

    async fn connect(&self, config: &Config) -> Result<(), EndpointError> {
        let name = &config.endpoint;
        let attempt = async {
            loop {
                match ClientOptions::new().open(name) {
                    Ok(client) => {
                        drop(client);
                        return Ok(());
                    }
                    Err(e) if e.raw_os_error() == Some(ERROR_PIPE_BUSY) => {
                        tokio::time::sleep(BUSY_RETRY).await;
                    }
                    Err(e) => return Err(EndpointError::Connect(name.clone(), e)),
                }
            }
        };

        tokio::time::timeout(config.connect_timeout, attempt)
            .await
            .map_err(|_| EndpointError::ConnectTimeout(name.clone()))?
    }

    fn release(&self, _config: &Config) -> Result<(), EndpointError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "windows_tests.rs"]
mod tests;
