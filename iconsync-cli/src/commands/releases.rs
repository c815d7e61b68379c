//! `iconsync releases`: fetch upstream releases and save the sidecar.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use iconsync_core::sidecar;
use iconsync_sync::fetch_releases;

use crate::github::GithubReleases;

use super::load_config;

/// Arguments for `iconsync releases`.
#[derive(Args, Debug)]
pub struct ReleasesArgs {
    /// Sidecar path; defaults to `downstream.releases_file`.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl ReleasesArgs {
    pub fn run(self, config_path: &Path) -> Result<()> {
        let config = load_config(config_path)?;
        let out = self.out.unwrap_or_else(|| config.releases_file());

        let releases = fetch_releases(&config, &GithubReleases::from_env())
            .context("failed to list upstream releases")?;
        sidecar::save_releases(&out, &releases)
            .with_context(|| format!("failed to save '{}'", out.display()))?;

        println!(
            "{} {} releases saved to {}",
            "✓".green(),
            releases.len(),
            out.display()
        );
        Ok(())
    }
}
