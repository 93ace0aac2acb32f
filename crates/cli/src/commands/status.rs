// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sole status <identifier>` - report whether a primary is running

use anyhow::Result;
use clap::Args;
use sole_instance::{Config, Identifier, Role, SingleInstance};

use crate::output::{self, OutputFormat, StatusReport};

#[derive(Args)]
pub struct StatusArgs {
    /// Identifier shared by every instance of the application
    pub identifier: Identifier,
}

pub async fn handle(args: StatusArgs, format: OutputFormat) -> Result<()> {
    let config = Config::for_identifier(args.identifier);

    // Claim only: a listener here would take hand-offs meant for a real primary
    let role = match SingleInstance::probe(&config) {
        Ok(role) => role,
        Err(e) => {
            eprintln!("error: {}", e);
            Role::Failed
        }
    };

    let report = StatusReport {
        identifier: config.identifier,
        role,
        already_running: role.is_already_running(),
        lock_path: config.lock_path,
        endpoint: config.endpoint,
    };
    output::print(&report, format);
    Ok(())
}
