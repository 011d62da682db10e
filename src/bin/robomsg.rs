// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomsg CLI
//!
//! Inspect message types and encode/decode ROS1 wire-format messages.
//!
//! ## Usage
//!
//! ```sh
//! # List known message types
//! robomsg schema list
//!
//! # Show checksum, fields and definition of a type
//! robomsg schema show hesai_lidar/PandarPacket
//!
//! # Encode a partial JSON record to hex
//! robomsg encode hesai_lidar/PandarPacket '{"data": [1, 2, 3], "size": 3}'
//!
//! # Decode hex back to JSON
//! robomsg decode hesai_lidar/PandarPacket 05000000000000000300000001020303000000
//!
//! # Load extra types from a catalog
//! robomsg --catalog radar.toml schema list
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeArgs, EncodeArgs, SchemaCmd, SizeArgs};
use common::{load_registry, Result};

/// Robomsg - ROS1 message codec toolkit
///
/// Encode, decode and inspect ROS1 wire-format messages using builtin
/// types or types declared in TOML catalogs.
#[derive(Parser, Clone)]
#[command(name = "robomsg")]
#[command(about = "ROS1 message codec toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Catalog file declaring extra message types (repeatable)
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Schema operations (list, show)
    #[command(subcommand)]
    Schema(SchemaCmd),

    /// Encode a JSON record to hex
    Encode(EncodeArgs),

    /// Decode hex to a JSON record
    Decode(DecodeArgs),

    /// Print the encoded size of a JSON record
    Size(SizeArgs),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let registry = load_registry(&cli.catalog)?;

    match cli.command {
        Commands::Schema(cmd) => cmd.run(&registry),
        Commands::Encode(args) => args.run(&registry),
        Commands::Decode(args) => args.run(&registry),
        Commands::Size(args) => args.run(&registry),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
