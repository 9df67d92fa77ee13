// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wsi - CLI for the WSI workflow scheduler daemon (`wsid`)

mod client;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use client::WsiClient;
use commands::{job, user, workflow};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "wsi", version, about = "Client for the wsid workflow daemon")]
struct Cli {
    /// Daemon base URL
    #[arg(long, env = "WSI_DAEMON_URL", default_value = "http://127.0.0.1:8080", global = true)]
    daemon_url: String,

    /// User ID sent as X-User-ID (required by every endpoint but `user active`)
    #[arg(long, env = "WSI_USER", global = true)]
    user: Option<String>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Workflow submission and inspection
    Workflow(workflow::WorkflowArgs),
    /// Job inspection, cancellation, and results
    Job(job::JobArgs),
    /// Caller identity and daemon-wide activity
    User(user::UserArgs),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let client = WsiClient::new(cli.daemon_url, cli.user);

    match cli.command {
        Commands::Workflow(args) => workflow::run(args, &client, cli.output).await,
        Commands::Job(args) => job::run(args, &client, cli.output).await,
        Commands::User(args) => user::run(args, &client, cli.output).await,
    }
}
