// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wsi job` - inspect, cancel, and fetch results for jobs (§6.3, §6.4)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::client::WsiClient;
use crate::output::{print_value, OutputFormat};

#[derive(Args)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: JobCommand,
}

#[derive(Subcommand)]
pub enum JobCommand {
    /// List jobs belonging to a workflow
    List {
        /// Workflow ID
        workflow_id: String,
    },
    /// Show one job's status and progress
    Get {
        /// Job ID
        id: String,
    },
    /// Cancel a job that hasn't started running yet
    Cancel {
        /// Job ID
        id: String,
    },
    /// Fetch a finished job's structured result
    Result {
        /// Job ID
        id: String,
    },
    /// Save a job's mask PNG to a file
    Mask {
        /// Job ID
        id: String,
        /// Output path
        #[arg(short, long, default_value = "mask.png")]
        out: PathBuf,
    },
    /// Save a job's overlay PNG to a file
    Overlay {
        /// Job ID
        id: String,
        #[arg(short, long, default_value = "overlay.png")]
        out: PathBuf,
    },
}

pub async fn run(args: JobArgs, client: &WsiClient, format: OutputFormat) -> Result<()> {
    match args.command {
        JobCommand::List { workflow_id } => {
            let jobs = client.list_jobs_for_workflow(&workflow_id).await?;
            print_value(format, &jobs);
        }
        JobCommand::Get { id } => {
            let job = client.get_job(&id).await?;
            print_value(format, &job);
        }
        JobCommand::Cancel { id } => {
            let job = client.cancel_job(&id).await?;
            print_value(format, &job);
        }
        JobCommand::Result { id } => {
            let result = client.get_result(&id).await?;
            print_value(format, &result);
        }
        JobCommand::Mask { id, out } => {
            let bytes = client.get_mask_png(&id).await?;
            std::fs::write(&out, &bytes).with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
        }
        JobCommand::Overlay { id, out } => {
            let bytes = client.get_overlay_png(&id).await?;
            std::fs::write(&out, &bytes).with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
        }
    }
    Ok(())
}
