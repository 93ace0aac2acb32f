// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod notify;
pub mod run;
pub mod status;

use sole_instance::{InstanceEvent, SingleInstance};

/// Print faults queued during construction to stderr
fn report_startup_faults(instance: &mut SingleInstance) {
    while let Some(event) = instance.try_next_event() {
        match event {
            InstanceEvent::Error(e) => eprintln!("error: {}", e),
            // The accept loop has not been polled yet on this thread
            InstanceEvent::Notified => tracing::debug!("notification during startup"),
        }
    }
}

/// Ctrl-C, or SIGTERM on unix.
///
/// The SIGTERM handler is installed by [`Shutdown::install`], so a signal sent
/// right after the caller reports readiness is never lost.
struct Shutdown {
    #[cfg(unix)]
    sigterm: Option<tokio::signal::unix::Signal>,
}

impl Shutdown {
    fn install() -> Self {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::warn!(error = %e, "SIGTERM handler unavailable");
                    None
                }
            };
            Self { sigterm }
        }

        #[cfg(not(unix))]
        {
            Self {}
        }
    }

    async fn recv(&mut self) {
        #[cfg(unix)]
        {
            if let Some(sigterm) = self.sigterm.as_mut() {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
                return;
            }
        }

        let _ = tokio::signal::ctrl_c().await;
    }
}
