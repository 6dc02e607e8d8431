// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seekwell - search configuration registry.
//!
//! This is the binary entry point: the admin gateway plus operator commands
//! that read the config store directly.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod overview;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Seekwell - search configuration registry.
#[derive(Parser, Debug)]
#[command(name = "seekwell", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the admin API until Ctrl-C.
    Serve,
    /// Print all servers and indexes.
    Overview {
        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Ping the backend of every configured server.
    Check {
        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => seekwell_config::load_and_validate_path(path),
        None => seekwell_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            seekwell_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let Some(command) = cli.command else {
        println!("seekwell: use --help for available commands");
        return;
    };

    serve::init_tracing(&config.service.log_level);

    let result = match command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Overview { json, plain } => overview::run_overview(&config, json, plain).await,
        Commands::Check { json, plain } => match check::run_check(&config, json, plain).await {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(2),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("seekwell: {e}");
        std::process::exit(1);
    }
}
