mod audit;
mod commands;
mod config;
mod diagnostics;
mod error;
mod events;
mod manifest;
mod report;
mod resolver;
mod rules;
mod sidebar;
mod skeleton;
mod summary;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "SITEAUDIT_LOG";

/// Top-level CLI.
#[derive(Parser)]
#[command(name = "siteaudit", version, about = "Structural audit and maintenance for a static course site")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Check required files, page structure, links and ids; write the report
    Audit {
        /// Site root directory
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// Create placeholder pages for missing chapter, practice and reference files
    Skeletons {
        /// Site root directory
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// Copy the sidebar from index.html into every course page
    SyncSidebar {
        /// Site root directory
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Report pages that would change without writing; exit 1 if any
        #[arg(long)]
        check: bool,
    },
}

/// Install the stderr subscriber, filtered by `SITEAUDIT_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| return EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse arguments, run one command, and map its outcome to an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Audit { root } => commands::audit(&root),
        Commands::Skeletons { root } => commands::skeletons(&root),
        Commands::SyncSidebar { root, check } => commands::sync_sidebar(&root, check),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2)
        },
    };
}
