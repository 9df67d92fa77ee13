// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wsi user` - who the daemon thinks is calling, and who's active (§6.1)

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::client::WsiClient;
use crate::output::{print_value, OutputFormat};

#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Show the user ID resolved from --user/WSI_USER
    Me,
    /// Show users with jobs currently running, and the running job count
    Active,
}

pub async fn run(args: UserArgs, client: &WsiClient, format: OutputFormat) -> Result<()> {
    match args.command {
        UserCommand::Me => {
            let user = client.current_user().await?;
            print_value(format, &user);
        }
        UserCommand::Active => {
            let active = client.active_users().await?;
            print_value(format, &active);
        }
    }
    Ok(())
}
