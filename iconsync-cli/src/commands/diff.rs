//! `iconsync diff <icons-dir>`: show unified diffs for what generate would write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use iconsync_sync::diff_from_dir;

use super::load_config;

/// Arguments for `iconsync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Directory holding `<name>.svg` and optional `<name>.json` files.
    pub icons_dir: PathBuf,

    /// Output root to compare against; defaults to `downstream.output`.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self, config_path: &Path) -> Result<()> {
        let config = load_config(config_path)?;
        let out = self.out.unwrap_or_else(|| config.output_root());

        let diffs = diff_from_dir(&self.icons_dir, &out, &config.codegen)
            .with_context(|| format!("diff failed for '{}'", self.icons_dir.display()))?;

        if diffs.is_empty() {
            println!("No differences for '{}'.", out.display());
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
