//! `iconsync generate <icons-dir>`: generate from a local icon directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use iconsync_sync::generate_from_dir;

use super::{load_config, print_writes};

/// Arguments for `iconsync generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory holding `<name>.svg` and optional `<name>.json` files.
    pub icons_dir: PathBuf,

    /// Output root; defaults to `downstream.output` from the config.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Release tag to record in `VERSION` and file headers.
    #[arg(long)]
    pub tag: Option<String>,
}

impl GenerateArgs {
    pub fn run(self, config_path: &Path) -> Result<()> {
        let config = load_config(config_path)?;
        let out = self.out.unwrap_or_else(|| config.output_root());

        let outcome = generate_from_dir(
            &self.icons_dir,
            &out,
            &config.codegen,
            self.tag.as_deref(),
            false,
        )
        .with_context(|| format!("generate failed for '{}'", self.icons_dir.display()))?;

        println!(
            "{} {} icons, {} exports → {}",
            "✓".green(),
            outcome.icon_count,
            outcome.symbol_count,
            out.display()
        );
        print_writes(&outcome.results);
        for diagnostic in &outcome.diagnostics {
            println!("  {} {diagnostic}", "!".yellow());
        }
        Ok(())
    }
}
