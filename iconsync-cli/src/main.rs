//! iconsync: mirror upstream icon releases into a Rust component package.
//!
//! # Usage
//!
//! ```text
//! iconsync sync [--releases <file>] [--dry-run]
//! iconsync status [--releases <file>] [--json]
//! iconsync generate <icons-dir> [--out <dir>] [--tag <tag>]
//! iconsync diff <icons-dir> [--out <dir>]
//! iconsync releases [--out <file>]
//! ```

mod commands;
mod github;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    diff::DiffArgs, generate::GenerateArgs, releases::ReleasesArgs, status::StatusArgs,
    sync::SyncArgs,
};
use iconsync_core::config::CONFIG_FILE;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "iconsync",
    version,
    about = "Generate icon components for each upstream icon release",
    long_about = None,
)]
struct Cli {
    /// Path to the project configuration.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the next upstream release not yet tagged downstream.
    Sync(SyncArgs),

    /// Show missing releases and hand-edited generated files.
    Status(StatusArgs),

    /// Generate from a local icon directory.
    Generate(GenerateArgs),

    /// Show unified diff of what generate would write.
    Diff(DiffArgs),

    /// Fetch upstream releases and save the release sidecar.
    Releases(ReleasesArgs),
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Sync(args) => args.run(&cli.config),
        Commands::Status(args) => args.run(&cli.config),
        Commands::Generate(args) => args.run(&cli.config),
        Commands::Diff(args) => args.run(&cli.config),
        Commands::Releases(args) => args.run(&cli.config),
    }
}
