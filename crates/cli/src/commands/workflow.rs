// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wsi workflow` - submit and inspect workflows (§6.2)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::client::WsiClient;
use crate::output::{print_value, OutputFormat};

#[derive(Args)]
pub struct WorkflowArgs {
    #[command(subcommand)]
    pub command: WorkflowCommand,
}

#[derive(Subcommand)]
pub enum WorkflowCommand {
    /// Submit a workflow spec (JSON file matching §6.2's request body)
    Submit {
        /// Path to a JSON file: { "name": ..., "branches": [...] }
        file: PathBuf,
    },
    /// List the caller's workflows
    List,
    /// Show one workflow, including its overall progress
    Get {
        /// Workflow ID
        id: String,
    },
}

pub async fn run(args: WorkflowArgs, client: &WsiClient, format: OutputFormat) -> Result<()> {
    match args.command {
        WorkflowCommand::Submit { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let spec: serde_json::Value = serde_json::from_str(&contents)
                .with_context(|| format!("parsing {} as JSON", file.display()))?;
            let workflow = client.create_workflow(spec).await?;
            print_value(format, &workflow);
        }
        WorkflowCommand::List => {
            let workflows = client.list_workflows().await?;
            print_value(format, &workflows);
        }
        WorkflowCommand::Get { id } => {
            let workflow = client.get_workflow(&id).await?;
            print_value(format, &workflow);
        }
    }
    Ok(())
}
