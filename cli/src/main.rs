//! # sdkport Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the sdkport CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! sdkport --help
//!
//! # Import an SDK with increased verbosity
//! sdkport -vv import --project App/App.csproj --reference SQLite.WinRT81 --yes
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler
//! 4. Display any error and set the exit status
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (import, status, list)
mod common; // Shared utilities (fs, msbuild, selection, ui)
mod core; // Core logic (importer, manifest, config, errors)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "sdkport",
    about = "Move Extension SDK references into your solution",
    long_about = "Copies an Extension SDK from its global install location into a folder inside \
                  the solution and points the project's SDKReferenceDirectoryRoot at it, so the \
                  solution builds on machines without the SDK installed.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Import an Extension SDK reference into the solution.
    #[command(alias = "i")]
    Import(commands::import::ImportArgs),
    /// Show what `import` would do for a reference.
    #[command(alias = "s")]
    Status(commands::status::StatusArgs),
    /// List the Extension SDK references of a project.
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    // `Ok(false)`: the command finished but reported a failure to the user itself.
    let command_result = match cli.command {
        Commands::Import(args) => {
            commands::import::handle_import(args).map(|outcome| !outcome.is_failure())
        }
        Commands::Status(args) => commands::status::handle_status(args).map(|()| true),
        Commands::List(args) => commands::list::handle_list(args).map(|()| true),
    };

    match command_result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
