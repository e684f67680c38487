// SPDX-FileCopyrightText: 2026 BrainBridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! BrainBridge - browse community coding projects and chat about them.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod chat;
mod projects;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// BrainBridge - browse community coding projects and chat about them.
#[derive(Parser, Debug)]
#[command(name = "brainbridge", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List projects, optionally searched, filtered and sorted.
    Projects {
        /// Case-insensitive text matched against titles, descriptions and tags.
        #[arg(long, short)]
        search: Option<String>,
        /// Show only projects tagged with this language ("all" for every one).
        #[arg(long, short)]
        language: Option<String>,
        /// Sort order: recent, popular, trending or none.
        #[arg(long)]
        sort: Option<String>,
    },
    /// List every language tag used in the catalog.
    Languages,
    /// Open an interactive chat session.
    Chat {
        /// Chat in the community channel instead of with the assistant.
        #[arg(long)]
        peer: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => brainbridge_config::load_and_validate_path(path),
        None => brainbridge_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            brainbridge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Projects {
            search,
            language,
            sort,
        }) => projects::run_projects(
            &config.catalog,
            search.as_deref(),
            language.as_deref(),
            sort.as_deref(),
        ),
        Some(Commands::Languages) => projects::run_languages(&config.catalog),
        Some(Commands::Chat { peer }) => {
            let mode = if peer {
                chat::ChatMode::Peer
            } else {
                chat::ChatMode::Assistant
            };
            chat::run_chat(&config.conversation, mode).await
        }
        None => {
            println!("brainbridge: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber with an env filter.
///
/// Logs go to stderr so they never interleave with listings or the chat prompt.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("brainbridge={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
