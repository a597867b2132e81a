// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "diagout-monitor")]
#[command(about = "Read diagnostic output from a diagout device")]
#[command(version = env!("DIAGOUT_VERSION"), long_version = env!("DIAGOUT_LONG_VERSION"))]
pub struct Cli {
    /// Serial port (e.g., /dev/ttyUSB0)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate, must match the firmware
    #[arg(short, long, default_value = "9600")]
    pub baud: u32,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List serial ports
    List,

    /// Print device output until interrupted
    Watch {
        /// Hex dump instead of text lines
        #[arg(long)]
        hex: bool,

        /// Check the stress writer's counter lines for gaps
        #[arg(long, conflicts_with = "hex")]
        check_counter: bool,
    },
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List => commands::list(),
        Commands::Watch { hex, check_counter } => {
            let port = cli
                .port
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--port is required for this command"))?;
            let view = if hex {
                commands::View::hex()
            } else {
                commands::View::text(check_counter)
            };
            commands::watch(port, cli.baud, view)
        }
    }
}
