//! `iconsync sync`: generate the next upstream release not yet tagged downstream.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use iconsync_sync::{pipeline, GitCli, RunOptions};

use super::{load_config, print_writes, release_source};

/// Arguments for `iconsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Read releases from a saved sidecar instead of the GitHub API.
    #[arg(long, value_name = "FILE")]
    pub releases: Option<PathBuf>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self, config_path: &Path) -> Result<()> {
        let config = load_config(config_path)?;
        let options = RunOptions {
            dry_run: self.dry_run,
            save_sidecar: self.releases.is_none(),
        };
        let source = release_source(self.releases);

        let outcome = match pipeline::run(&config, source.as_ref(), &GitCli::default(), options) {
            Ok(outcome) => outcome,
            Err(e) if e.is_nothing_to_do() => {
                println!("{} {e}", "✓".green());
                return Ok(());
            }
            Err(e) => return Err(e).context("sync failed"),
        };

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        println!(
            "{prefix}{} {} generated ({} icons, {} exports)",
            "✓".green(),
            outcome.release.tag.bold(),
            outcome.generated.icon_count,
            outcome.generated.symbol_count
        );
        print_writes(&outcome.generated.results);
        for diagnostic in &outcome.generated.diagnostics {
            println!("  {} {diagnostic}", "!".yellow());
        }
        if outcome.remaining > 0 {
            println!(
                "{} more release(s) pending. Tag {} downstream, then run 'iconsync sync' again.",
                outcome.remaining, outcome.release.tag
            );
        }
        Ok(())
    }
}
