//! Version reconciliation: which upstream releases are not yet mirrored.
//!
//! Releases are walked newest-first and the walk stops at the first release
//! whose tag already exists downstream. This assumes upstream publishes
//! monotonically and downstream tags have no gaps; an older release that was
//! skipped out of order will not be detected.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::ReconcileError;
use crate::types::Release;

/// Strip leading version-prefix characters (`v1.2.0` → `1.2.0`).
///
/// Idempotent: all leading `v`/`V` characters are removed at once.
pub fn normalize_tag(tag: &str) -> &str {
    tag.trim().trim_start_matches(['v', 'V'])
}

/// Releases still to be generated, as a newest-first prefix of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSet<'a> {
    pub missing: &'a [Release],
    /// The newest release already present downstream, where the walk stopped.
    pub latest_matched: Option<&'a Release>,
}

impl<'a> MissingSet<'a> {
    /// The oldest missing release: runs catch up one release at a time.
    pub fn next_to_sync(&self) -> Option<&'a Release> {
        self.missing.last()
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn len(&self) -> usize {
        self.missing.len()
    }
}

/// Compute the releases missing from `tags`.
///
/// `releases` must be sorted newest-first (see [`sort_releases`]).
pub fn missing_since<'a, S: AsRef<str>>(tags: &[S], releases: &'a [Release]) -> MissingSet<'a> {
    let tag_set: HashSet<&str> = tags.iter().map(|t| normalize_tag(t.as_ref())).collect();

    let stop = releases
        .iter()
        .position(|r| tag_set.contains(normalize_tag(&r.tag)));

    let latest_matched = stop.map(|i| &releases[i]);
    match latest_matched {
        Some(release) => tracing::info!("latest matched tag: {}", release.tag),
        None => tracing::info!("no upstream release is tagged downstream yet"),
    }

    MissingSet {
        missing: &releases[..stop.unwrap_or(releases.len())],
        latest_matched,
    }
}

/// Pick the next release to synchronize, or explain why there is none.
pub fn select_next<'a>(
    releases: &[Release],
    missing: &MissingSet<'a>,
) -> Result<&'a Release, ReconcileError> {
    if releases.is_empty() {
        return Err(ReconcileError::NoReleases);
    }
    missing.next_to_sync().ok_or_else(|| ReconcileError::UpToDate {
        latest: missing
            .latest_matched
            .map(|r| r.tag.clone())
            .unwrap_or_else(|| releases[0].tag.clone()),
    })
}

/// Stable sort by `published_at`, newest first. Ties keep fetch order.
pub fn sort_releases(releases: &mut [Release]) {
    releases.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Keep only releases published strictly after `since`.
pub fn filter_published_after(releases: Vec<Release>, since: DateTime<Utc>) -> Vec<Release> {
    releases
        .into_iter()
        .filter(|r| r.published_at > since)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn release(tag: &str, day: u32) -> Release {
        Release {
            id: day as i64,
            tag: tag.to_string(),
            display_name: tag.to_string(),
            zipball_url: String::new(),
            url: String::new(),
            html_url: String::new(),
            published_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn tags_of(releases: &[Release]) -> Vec<&str> {
        releases.iter().map(|r| r.tag.as_str()).collect()
    }

    #[test]
    fn stops_at_first_matched_release() {
        let releases = vec![release("2.0.0", 3), release("1.5.0", 2), release("1.0.0", 1)];
        let set = missing_since(&["1.0.0"], &releases);
        assert_eq!(tags_of(set.missing), vec!["2.0.0", "1.5.0"]);
        assert_eq!(set.latest_matched.map(|r| r.tag.as_str()), Some("1.0.0"));
        assert_eq!(set.next_to_sync().map(|r| r.tag.as_str()), Some("1.5.0"));
    }

    #[test]
    fn empty_tag_set_means_everything_missing() {
        let releases = vec![release("3.0.0", 3), release("2.0.0", 2), release("1.0.0", 1)];
        let set = missing_since::<&str>(&[], &releases);
        assert_eq!(set.len(), 3);
        assert_eq!(set.next_to_sync().map(|r| r.tag.as_str()), Some("1.0.0"));
    }

    #[test]
    fn prefix_normalization_applies_to_both_sides() {
        let releases = vec![release("v1.1.0", 2), release("1.0.0", 1)];
        let set = missing_since(&["v1.0.0", "garbage"], &releases);
        assert_eq!(tags_of(set.missing), vec!["v1.1.0"]);

        let set = missing_since(&["1.1.0"], &releases);
        assert!(set.is_empty());
    }

    #[test]
    fn older_releases_past_the_match_are_not_evaluated() {
        // 1.0.0 is missing downstream but sits behind the matched 1.5.0.
        let releases = vec![release("2.0.0", 3), release("1.5.0", 2), release("1.0.0", 1)];
        let set = missing_since(&["1.5.0"], &releases);
        assert_eq!(tags_of(set.missing), vec!["2.0.0"]);
    }

    #[test]
    fn normalize_is_idempotent() {
        for tag in ["v1.0.0", "vv1.0.0", "1.0.0", "V2", ""] {
            let once = normalize_tag(tag);
            assert_eq!(normalize_tag(once), once, "tag {tag:?}");
        }
    }

    #[test]
    fn select_next_reports_nothing_to_do() {
        let empty: Vec<Release> = Vec::new();
        let set = missing_since(&["1.0.0"], &empty);
        assert_eq!(select_next(&empty, &set), Err(ReconcileError::NoReleases));

        let releases = vec![release("1.0.0", 1)];
        let set = missing_since(&["v1.0.0"], &releases);
        assert_eq!(
            select_next(&releases, &set),
            Err(ReconcileError::UpToDate {
                latest: "1.0.0".to_string()
            })
        );
    }

    #[test]
    fn sort_is_newest_first_and_stable() {
        let mut releases = vec![release("a", 1), release("b", 3), release("c", 3), release("d", 2)];
        sort_releases(&mut releases);
        assert_eq!(tags_of(&releases), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn filter_keeps_strictly_newer() {
        let releases = vec![release("3", 3), release("2", 2), release("1", 1)];
        let since = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let kept = filter_published_after(releases, since);
        assert_eq!(tags_of(&kept), vec!["3"]);
    }
}
