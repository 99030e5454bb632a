//! # Poster Tiler CLI Library
//!
//! Command-line front end for the poster tiler: parses arguments, loads
//! configuration, and drives `poster-core` and `poster-render`.
//!
//! ## Module Organization
//! ```text
//! poster_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── scheduler.rs    ◄─── Debounced layout recomputation
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── poster.toml + POSTER_* environment
//! │   └── session.rs  ◄─── Current settings + image, generation counter
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared helpers
//! │   ├── layout.rs   ◄─── Geometry report
//! │   ├── render.rs   ◄─── Page files
//! │   ├── suggest.rs  ◄─── Grid suggestion
//! │   ├── config.rs   ◄─── Effective configuration
//! │   └── watch.rs    ◄─── Interactive re-rendering
//! └── error.rs        ◄─── CLI error type and exit codes
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod scheduler;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use error::CliResult;
use state::ConfigState;

/// Runs the command-line application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap derive, usage errors exit with status 2                      │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,poster=debug, overridden by RUST_LOG or -v/-q       │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → poster.toml → POSTER_* variables, validated           │
/// │                                                                         │
/// │  4. Dispatch Subcommand ──────────────────────────────────────────────► │
/// │     • errors print to stderr and map to a sysexits-style status        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            eprintln!("error: {}", e.message);
            e.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let config = ConfigState::load(cli.config)?;
    info!(command = command_name(&cli.command), "Starting poster-tiler");

    match cli.command {
        Command::Layout(args) => commands::layout::run(&args, &config),
        Command::Render(args) => commands::render::run(args, &config).await,
        Command::Suggest(args) => commands::suggest::run(&args, &config),
        Command::Config => commands::config::run(&config),
        Command::Watch(args) => commands::watch::run(args, &config).await,
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Layout(_) => "layout",
        Command::Render(_) => "render",
        Command::Suggest(_) => "suggest",
        Command::Config => "config",
        Command::Watch(_) => "watch",
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `-q` - warnings and errors only
/// - `-v` / `-vv` - debug / trace everywhere
/// - `RUST_LOG=poster_render=trace` - per-crate control
/// - Default: `info,poster=debug`
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = match (quiet, verbose) {
        (true, _) => EnvFilter::new("warn"),
        (false, 0) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,poster=debug")),
        (false, 1) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
