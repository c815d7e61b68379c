//! GitHub release listing over the REST API.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use iconsync_core::{reconcile::sort_releases, Release};
use iconsync_sync::{ReleaseSource, SyncError};

const API_ROOT: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

/// Wire shape of one entry of `GET /repos/{owner}/{repo}/releases`.
#[derive(Debug, Deserialize)]
struct GhRelease {
    id: i64,
    tag_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    zipball_url: Option<String>,
    url: String,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
    published_at: Option<DateTime<Utc>>,
}

impl GhRelease {
    fn into_release(self) -> Option<Release> {
        if self.draft || self.prerelease {
            return None;
        }
        Some(Release {
            id: self.id,
            display_name: self.name.unwrap_or_else(|| self.tag_name.clone()),
            tag: self.tag_name,
            zipball_url: self.zipball_url.unwrap_or_default(),
            url: self.url,
            html_url: self.html_url,
            published_at: self.published_at?,
        })
    }
}

/// [`ReleaseSource`] backed by the GitHub REST API.
///
/// Authenticates with `GITHUB_TOKEN` when it is set.
pub struct GithubReleases {
    agent: ureq::Agent,
    token: Option<String>,
}

impl GithubReleases {
    pub fn from_env() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("iconsync/", env!("CARGO_PKG_VERSION")))
            .build();
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        Self { agent, token }
    }

    fn page(&self, owner: &str, repo: &str, page: usize) -> Result<Vec<GhRelease>, SyncError> {
        let url = format!("{API_ROOT}/repos/{owner}/{repo}/releases");
        let mut request = self
            .agent
            .get(&url)
            .set("Accept", "application/vnd.github+json")
            .query("per_page", &PER_PAGE.to_string())
            .query("page", &page.to_string());
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(code, response) => SyncError::Source(format!(
                "GET {url} page {page}: HTTP {code} {}",
                response.status_text()
            )),
            other => SyncError::Source(format!("GET {url} page {page}: {other}")),
        })?;
        response
            .into_json()
            .map_err(|e| SyncError::Source(format!("GET {url} page {page}: invalid JSON: {e}")))
    }
}

impl ReleaseSource for GithubReleases {
    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>, SyncError> {
        let mut releases = Vec::new();
        for page in 1.. {
            let batch = self.page(owner, repo, page)?;
            tracing::debug!("page {page}: {} releases", batch.len());
            if batch.is_empty() {
                break;
            }
            releases.extend(batch.into_iter().filter_map(GhRelease::into_release));
        }
        sort_releases(&mut releases);
        Ok(releases)
    }
}
