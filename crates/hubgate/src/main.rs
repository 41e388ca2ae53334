// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hubgate - a reverse-proxy gateway with pluggable backend services.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod inspect;
mod serve;
mod shutdown;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hubgate_config::{ConfigError, HubgateConfig};

/// Hubgate - a reverse-proxy gateway with pluggable backend services.
#[derive(Parser, Debug)]
#[command(name = "hubgate", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load all declared services and serve the gateway.
    Serve,
    /// Validate configuration and instantiate every service without serving.
    Check,
    /// List the declared services.
    Services,
}

fn load_config(path: Option<&Path>) -> Result<HubgateConfig, Vec<ConfigError>> {
    match path {
        Some(path) => hubgate_config::load_and_validate_path(path),
        None => hubgate_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("hubgate: use --help for available commands");
        return;
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            hubgate_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match command {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("hubgate: {e}");
                std::process::exit(1);
            }
        }
        Commands::Check => {
            match inspect::check_services(&config, hubgate_integrations::builtin_catalog()) {
                Ok(report) => {
                    for line in report {
                        println!("{line}");
                    }
                    println!(
                        "hubgate: configuration ok ({} services, listening on {})",
                        config.services.len(),
                        config.server.bind_address()
                    );
                }
                Err(e) => {
                    eprintln!("hubgate: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Services => {
            print!("{}", inspect::services_table(&config));
        }
    }
}
