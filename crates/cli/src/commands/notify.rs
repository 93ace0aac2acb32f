// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sole notify <identifier>` - signal the running primary

use anyhow::Result;
use clap::Args;
use sole_instance::{Identifier, SingleInstance};

use super::report_startup_faults;
use crate::output::{self, Line, OutputFormat};

#[derive(Args)]
pub struct NotifyArgs {
    /// Identifier shared by every instance of the application
    pub identifier: Identifier,
}

pub async fn handle(args: NotifyArgs, format: OutputFormat) -> Result<()> {
    let mut instance = SingleInstance::new(args.identifier).await;
    report_startup_faults(&mut instance);

    if instance.is_already_running() {
        instance.notify().await;
        output::print(&Line::Sent, format);
    } else {
        output::print(&Line::NoPrimary, format);
    }

    instance.shutdown();
    Ok(())
}
