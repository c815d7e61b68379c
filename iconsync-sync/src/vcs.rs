//! Version-control collaborator.
//!
//! The core only needs tags as opaque strings plus clone/fetch/checkout of
//! the upstream repository. [`GitCli`] shells out to `git`; tests supply
//! their own [`Vcs`] implementation.

use std::path::Path;
use std::process::Command;

use crate::error::{io_err, SyncError};

/// Operations the sync pipeline needs from version control.
pub trait Vcs {
    /// All tags in the repository at `path`.
    fn list_tags(&self, path: &Path) -> Result<Vec<String>, SyncError>;

    /// Clone `url` into `path` unless a repository already exists there.
    fn clone_repo(&self, url: &str, path: &Path) -> Result<(), SyncError>;

    fn fetch_tags(&self, path: &Path) -> Result<(), SyncError>;

    /// Check out `tag` in the repository at `path`.
    fn checkout(&self, tag: &str, path: &Path) -> Result<(), SyncError>;
}

/// [`Vcs`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, SyncError> {
        let command = format!("{} {}", self.program, args.join(" "));
        tracing::debug!("running {command}");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| io_err(&self.program, e))?;

        if !output.status.success() {
            return Err(SyncError::Vcs {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Trimmed, non-empty lines of `git tag` output.
pub fn parse_tag_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl Vcs for GitCli {
    fn list_tags(&self, path: &Path) -> Result<Vec<String>, SyncError> {
        let stdout = self.run(&["-C", &*path.to_string_lossy(), "tag"])?;
        Ok(parse_tag_list(&stdout))
    }

    fn clone_repo(&self, url: &str, path: &Path) -> Result<(), SyncError> {
        if path.join(".git").exists() {
            tracing::debug!("{} already cloned", path.display());
            return Ok(());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        tracing::info!("cloning {url} into {}", path.display());
        self.run(&["clone", url, &*path.to_string_lossy()])?;
        Ok(())
    }

    fn fetch_tags(&self, path: &Path) -> Result<(), SyncError> {
        self.run(&["-C", &*path.to_string_lossy(), "fetch", "--tags"])?;
        Ok(())
    }

    fn checkout(&self, tag: &str, path: &Path) -> Result<(), SyncError> {
        tracing::info!("checking out {tag} in {}", path.display());
        let target = format!("tags/{tag}");
        self.run(&["-C", &*path.to_string_lossy(), "checkout", target.as_str()])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_list_drops_blank_lines() {
        let tags = parse_tag_list("0.1.0\n  v0.2.0  \n\n0.3.0\n");
        assert_eq!(tags, vec!["0.1.0", "v0.2.0", "0.3.0"]);
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let git = GitCli::new("iconsync-definitely-not-a-real-git");
        let err = git.list_tags(Path::new(".")).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }), "got: {err}");
    }
}
