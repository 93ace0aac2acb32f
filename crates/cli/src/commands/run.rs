// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sole run <identifier>` - become the primary, or hand off to it

use anyhow::Result;
use clap::Args;
use sole_instance::{Identifier, InstanceEvent, SingleInstance};
use tracing::info;

use super::{report_startup_faults, Shutdown};
use crate::output::{self, Line, OutputFormat};

#[derive(Args)]
pub struct RunArgs {
    /// Identifier shared by every instance of the application
    pub identifier: Identifier,

    /// Exit after this many notifications (default: run until interrupted)
    #[arg(long)]
    pub exit_after: Option<usize>,
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let mut shutdown = Shutdown::install();
    let mut instance = SingleInstance::new(args.identifier).await;
    report_startup_faults(&mut instance);

    if instance.is_already_running() {
        output::print(&Line::AlreadyRunning, format);
        instance.notify().await;
        return Ok(());
    }

    output::print(&Line::Primary, format);

    let mut received = 0usize;
    let mut deaf = false;
    while args.exit_after.map_or(true, |n| received < n) {
        tokio::select! {
            event = instance.next_event() => match event {
                Some(InstanceEvent::Notified) => {
                    received += 1;
                    output::print(&Line::Notified, format);
                }
                Some(InstanceEvent::Error(e)) => eprintln!("error: {}", e),
                None => {
                    deaf = true;
                    break;
                }
            },
            _ = shutdown.recv() => {
                info!("interrupted, shutting down");
                break;
            }
        }
    }

    // Primary without listener: hold the claim until told to stop
    if deaf {
        shutdown.recv().await;
    }

    instance.shutdown();
    Ok(())
}
