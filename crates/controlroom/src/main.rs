// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Control Room - discover and inspect installed dashboard panels.
//!
//! This is the binary entry point. It loads configuration, runs one discovery
//! pass, and renders the result for the chosen subcommand.

mod context;
mod demo;
mod doctor;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;

use crate::context::AppContext;

/// Control Room - discover and inspect installed dashboard panels.
#[derive(Parser, Debug)]
#[command(name = "controlroom", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Register the bundled `example` and `demo` panels before discovery.
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered panels in registry order.
    Panels {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show the featured catalog with installation status.
    Featured {
        /// Only show entries whose name or description matches.
        #[arg(long)]
        search: Option<String>,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show the admin entries and dual-registration decisions.
    Admin {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Check discovery, validation, and link resolution for every panel.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => controlroom_config::load_and_validate_path(path),
        None => controlroom_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            controlroom_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let ctx = AppContext::bootstrap(config, cli.demo);

    match cli.command {
        Some(Commands::Panels { json }) => render::panels(&ctx, json),
        Some(Commands::Featured { search, json }) => {
            render::featured(&ctx, search.as_deref(), json)
        }
        Some(Commands::Admin { json }) => render::admin(&ctx, json),
        Some(Commands::Doctor { plain }) => {
            doctor::run_doctor(&ctx, plain);
            Ok(())
        }
        Some(Commands::Config) => {
            let rendered = toml::to_string_pretty(&ctx.config).into_diagnostic()?;
            print!("{rendered}");
            Ok(())
        }
        None => {
            println!("controlroom: use --help for available commands");
            Ok(())
        }
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("controlroom={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["controlroom", "panels", "--json", "--demo"]);
        assert!(cli.demo);
        assert!(matches!(cli.command, Some(Commands::Panels { json: true })));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = controlroom_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.host.namespace, "control_room");
    }
}
