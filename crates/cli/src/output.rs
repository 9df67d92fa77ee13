// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed, for a human at a terminal.
    #[default]
    Text,
    /// Compact single-line JSON, for piping into `jq` or a script.
    Json,
}

pub fn print_value(format: OutputFormat, value: &Value) {
    match format {
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value).unwrap_or_default()),
        OutputFormat::Json => println!("{value}"),
    }
}
