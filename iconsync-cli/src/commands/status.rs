//! `iconsync status`: pending releases and generated-file drift.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use iconsync_sync::{pipeline, GitCli, StatusReport};

use super::{load_config, release_source};

/// Arguments for `iconsync status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Read releases from a saved sidecar instead of the GitHub API.
    #[arg(long, value_name = "FILE")]
    pub releases: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self, config_path: &Path) -> Result<()> {
        let config = load_config(config_path)?;
        let source = release_source(self.releases);
        let report = pipeline::status(&config, source.as_ref(), &GitCli::default())
            .context("status check failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        print_report(&report);
        Ok(())
    }
}

#[derive(Tabled)]
struct MissingRow {
    #[tabled(rename = "tag")]
    tag: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "published")]
    published: String,
}

fn print_report(report: &StatusReport) {
    let version = report.current_version.as_deref().unwrap_or("none");
    println!(
        "iconsync v{} | generated: {} | missing: {}",
        env!("CARGO_PKG_VERSION"),
        version.bold(),
        report.missing.len()
    );

    match &report.next {
        Some(next) => {
            let rows: Vec<MissingRow> = report
                .missing
                .iter()
                .map(|r| MissingRow {
                    tag: r.tag.clone(),
                    name: r.display_name.clone(),
                    published: r.published_at.format("%Y-%m-%d").to_string(),
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
            println!("{} next: {}", "■".yellow().bold(), next.tag.bold());
        }
        None => {
            let latest = report
                .latest_matched
                .as_ref()
                .map(|r| r.tag.as_str())
                .unwrap_or("-");
            println!("{} up to date with {latest}", "■".green().bold());
        }
    }

    if !report.modified.is_empty() {
        println!(
            "{} {} generated file(s) edited since last generation:",
            "■".red().bold(),
            report.modified.len()
        );
        for path in &report.modified {
            println!("  {}", path.display());
        }
    }
}
