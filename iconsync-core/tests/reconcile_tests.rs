//! Reconciliation properties over table-driven tag sets.
//!
//! Each `#[case]` is isolated: no shared state.

use chrono::{TimeZone, Utc};
use iconsync_core::{missing_since, normalize_tag, select_next, Release, ReconcileError};
use rstest::rstest;

fn releases(tags: &[&str]) -> Vec<Release> {
    // Newest first: the first tag gets the latest timestamp.
    let n = tags.len() as i64;
    tags.iter()
        .enumerate()
        .map(|(i, tag)| Release {
            id: i as i64,
            tag: tag.to_string(),
            display_name: format!("Version {tag}"),
            zipball_url: String::new(),
            url: String::new(),
            html_url: String::new(),
            published_at: Utc.timestamp_opt(1_700_000_000 + (n - i as i64) * 86_400, 0).unwrap(),
        })
        .collect()
}

#[rstest]
#[case::one_synced(&["1.0.0"], &["2.0.0", "1.5.0", "1.0.0"], &["2.0.0", "1.5.0"], Some("1.5.0"))]
#[case::nothing_synced(&[], &["3.0.0", "2.0.0", "1.0.0"], &["3.0.0", "2.0.0", "1.0.0"], Some("1.0.0"))]
#[case::fully_synced(&["v3.0.0"], &["3.0.0", "2.0.0"], &[], None)]
#[case::unrelated_tags(&["nightly", "x"], &["2.0.0", "1.0.0"], &["2.0.0", "1.0.0"], Some("1.0.0"))]
#[case::prefixed_releases(&["0.9.0"], &["v1.1.0", "v1.0.0", "v0.9.0"], &["v1.1.0", "v1.0.0"], Some("v1.0.0"))]
fn missing_is_prefix_before_first_match(
    #[case] tags: &[&str],
    #[case] upstream: &[&str],
    #[case] expected: &[&str],
    #[case] next: Option<&str>,
) {
    let rel = releases(upstream);
    let set = missing_since(tags, &rel);

    let got: Vec<&str> = set.missing.iter().map(|r| r.tag.as_str()).collect();
    assert_eq!(got, expected);

    // Same order, same leading elements as the input.
    assert_eq!(set.missing, &rel[..set.missing.len()]);
    if let Some(stop) = rel.get(set.missing.len()) {
        let normalized: Vec<&str> = tags.iter().map(|t| normalize_tag(t)).collect();
        assert!(normalized.contains(&normalize_tag(&stop.tag)));
    }

    assert_eq!(set.next_to_sync().map(|r| r.tag.as_str()), next);
}

#[rstest]
#[case("v1.2.3", "1.2.3")]
#[case("1.2.3", "1.2.3")]
#[case("vv1", "1")]
#[case(" v0.1.0 ", "0.1.0")]
fn normalization_strips_prefix_once_and_for_all(#[case] tag: &str, #[case] expected: &str) {
    assert_eq!(normalize_tag(tag), expected);
    assert_eq!(normalize_tag(normalize_tag(tag)), expected);
}

#[test]
fn up_to_date_names_latest_matched() {
    let rel = releases(&["2.0.0", "1.0.0"]);
    let set = missing_since(&["2.0.0"], &rel);
    let err = select_next(&rel, &set).unwrap_err();
    assert_eq!(
        err,
        ReconcileError::UpToDate {
            latest: "2.0.0".to_string()
        }
    );
    assert!(err.to_string().contains("2.0.0"));
}
