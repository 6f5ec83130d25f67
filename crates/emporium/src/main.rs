// SPDX-FileCopyrightText: 2026 Emporium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Emporium - inspect the plugin catalog.
//!
//! This is the binary entry point. It loads configuration, loads the catalog
//! once and answers a single query.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::{Outcome, OutputMode, Query};

/// Emporium - inspect the plugin catalog.
#[derive(Parser, Debug)]
#[command(name = "emporium", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every plugin in catalog order.
    Plugins,
    /// List categories in first-seen order.
    Categories,
    /// List the plugins in one category.
    Category {
        /// Category name as used by plugins (e.g., "git").
        name: String,
    },
    /// Show a single plugin.
    Show {
        /// Exact plugin name.
        name: String,
    },
    /// List verified, active plugins.
    Featured {
        /// Maximum number of plugins (defaults to `catalog.featured_limit`).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search names, descriptions and tags.
    Search {
        /// Case-insensitive substring.
        query: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => emporium_config::load_and_validate_path(path),
        None => emporium_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            emporium_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);

    let catalog = match commands::load_catalog(&config.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("emporium: {e}");
            return ExitCode::FAILURE;
        }
    };

    let query = match cli.command {
        Commands::Plugins => Query::Plugins,
        Commands::Categories => Query::Categories,
        Commands::Category { name } => Query::Category(name),
        Commands::Show { name } => Query::Show(name),
        Commands::Featured { limit } => {
            Query::Featured(limit.unwrap_or(config.catalog.featured_limit))
        }
        Commands::Search { query } => Query::Search(query),
    };
    let mode = OutputMode {
        json: cli.json,
        color: !cli.plain && std::io::stdout().is_terminal(),
    };

    let mut stdout = std::io::stdout().lock();
    match commands::run_query(&catalog, &query, mode, &mut stdout) {
        Ok(Outcome::Found) => ExitCode::SUCCESS,
        Ok(Outcome::NotFound) => {
            if let Query::Show(name) = &query {
                eprintln!("emporium: no plugin named `{name}`");
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("emporium: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so stdout stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("emporium={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
