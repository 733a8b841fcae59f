//! Tests for range-aware fetching.
//!
//! The state machine is tested directly; the driver is tested against a
//! mocked feed serving pages out of an in-memory release list.
use mockall::predicate::{always, eq};

use super::*;
use crate::{
    forge::traits::MockReleaseFeed,
    pager::paginate,
    test_helpers::{numbered_releases, page_of, tags},
};

fn mock_feed_for(releases: Vec<Release>, max_calls: usize) -> MockReleaseFeed {
    let mut feed = MockReleaseFeed::new();
    feed.expect_name().returning(|| "mock".into());
    feed.expect_fetch_release_page()
        .times(max_calls)
        .returning(move |_, page, per_page| {
            let page = paginate(&releases, per_page as usize, page as usize);
            Ok(ReleasePage {
                releases: page.items,
                has_next: page.has_next,
            })
        });
    feed
}

#[test]
fn test_latest_upper_bound_starts_satisfied() {
    let state = FetchState::new(&VersionRange::new("v1.0.0", "latest"));
    assert!(state.found_to);
    assert!(!state.found_from);

    let state = FetchState::new(&VersionRange::new("v1.0.0", "v2.0.0"));
    assert!(!state.found_to);
}

#[test]
fn test_step_continues_until_both_endpoints_seen() {
    let range = VersionRange::new("v1.0.0", "v3.0.0");
    let state = FetchState::new(&range);

    let (state, step) = state.step(&range, &page_of(&["v4.0.0", "v3.0.0"], true));
    assert_eq!(step, FetchStep::Continue);
    assert!(state.found_to);
    assert_eq!(state.pages_fetched, 1);

    let (state, step) = state.step(&range, &page_of(&["v2.0.0", "v1.0.0"], true));
    assert_eq!(step, FetchStep::Resolved);
    assert!(state.is_resolved());
    assert_eq!(state.pages_fetched, 2);
}

#[test]
fn test_step_resolves_even_when_more_pages_exist() {
    let range = VersionRange::new("v1.0.0", "latest");
    let (state, step) = FetchState::new(&range)
        .step(&range, &page_of(&["v2.0.0", "v1.0.0"], true));

    assert_eq!(step, FetchStep::Resolved);
    assert!(!state.exhausted);
}

#[test]
fn test_step_reports_exhaustion_with_missing_endpoint() {
    let range = VersionRange::new("v0.1.0", "latest");
    let (state, step) = FetchState::new(&range)
        .step(&range, &page_of(&["v2.0.0", "v1.0.0"], false));

    assert_eq!(step, FetchStep::Exhausted);
    assert!(state.exhausted);
    assert!(!state.found_from);
}

#[test]
fn test_step_prefers_resolved_over_exhausted_on_last_page() {
    let range = VersionRange::new("v1.0.0", "v2.0.0");
    let (_, step) = FetchState::new(&range)
        .step(&range, &page_of(&["v2.0.0", "v1.0.0"], false));

    assert_eq!(step, FetchStep::Resolved);
}

#[test_log::test(tokio::test)]
async fn test_stops_before_last_page_once_range_is_resolved() {
    // 12 pages of 30; the lowest endpoint sits on page 11
    let releases = numbered_releases(360);
    let to = releases[5].tag.clone();
    let from = releases[310].tag.clone();

    let feed = mock_feed_for(releases, 11);
    let fetcher = RangeFetcher::new(&feed, FetchOptions::default());
    let repo = RepositoryRef::new("renovatebot", "renovate");

    let outcome = fetcher
        .fetch_range(&repo, &VersionRange::new(from, to))
        .await
        .unwrap();

    assert_eq!(outcome.state.pages_fetched, 11);
    assert!(outcome.state.is_resolved());
    assert!(!outcome.state.exhausted);
    assert_eq!(outcome.releases.len(), 330);
}

#[test_log::test(tokio::test)]
async fn test_latest_range_stops_on_first_page_holding_from() {
    let releases = numbered_releases(90);
    let from = releases[10].tag.clone();

    let feed = mock_feed_for(releases, 1);
    let fetcher = RangeFetcher::new(&feed, FetchOptions::default());

    let outcome = fetcher
        .fetch_range(
            &RepositoryRef::new("o", "r"),
            &VersionRange::new(from, "latest"),
        )
        .await
        .unwrap();

    assert_eq!(outcome.state.pages_fetched, 1);
    assert_eq!(outcome.releases.len(), 30);
}

#[test_log::test(tokio::test)]
async fn test_exhausted_feed_passes_everything_through() {
    let releases = numbered_releases(45);

    let feed = mock_feed_for(releases, 2);
    let fetcher = RangeFetcher::new(&feed, FetchOptions::default());

    let outcome = fetcher
        .fetch_range(
            &RepositoryRef::new("o", "r"),
            &VersionRange::new("v99.0.0", "latest"),
        )
        .await
        .unwrap();

    assert!(outcome.state.exhausted);
    assert!(!outcome.state.found_from);
    assert_eq!(outcome.releases.len(), 45);
}

#[test_log::test(tokio::test)]
async fn test_page_bound_raises_range_unresolved() {
    let releases = numbered_releases(300);

    let feed = mock_feed_for(releases, 3);
    let fetcher = RangeFetcher::new(
        &feed,
        FetchOptions {
            page_size: 10,
            max_pages: 3,
        },
    );

    let err = fetcher
        .fetch_range(
            &RepositoryRef::new("o", "r"),
            &VersionRange::new("v0.0.1", "latest"),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ChangelogError::RangeUnresolved { pages: 3, .. }
    ));
}

#[test_log::test(tokio::test)]
async fn test_transport_failure_is_surfaced() {
    let mut feed = MockReleaseFeed::new();
    feed.expect_name().returning(|| "mock".into());
    feed.expect_fetch_release_page()
        .with(always(), eq(1), eq(30))
        .times(1)
        .returning(|_, _, _| Ok(page_of(&["v3.0.0", "v2.0.0"], true)));
    feed.expect_fetch_release_page()
        .with(always(), eq(2), eq(30))
        .times(1)
        .returning(|_, _, _| Err(ChangelogError::fetch("connection reset")));

    let fetcher = RangeFetcher::new(&feed, FetchOptions::default());

    let err = fetcher
        .fetch_range(
            &RepositoryRef::new("o", "r"),
            &VersionRange::new("v1.0.0", "latest"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ChangelogError::FetchFailure(_)));
}

#[test_log::test(tokio::test)]
async fn test_repeated_pages_are_deduplicated() {
    let mut feed = MockReleaseFeed::new();
    feed.expect_name().returning(|| "mock".into());
    feed.expect_fetch_release_page()
        .with(always(), eq(1), always())
        .returning(|_, _, _| Ok(page_of(&["v3.0.0", "v2.0.0"], true)));
    feed.expect_fetch_release_page()
        .with(always(), eq(2), always())
        .returning(|_, _, _| Ok(page_of(&["v3.0.0", "v2.0.0"], true)));
    feed.expect_fetch_release_page()
        .with(always(), eq(3), always())
        .returning(|_, _, _| Ok(page_of(&["v1.0.0"], false)));

    let fetcher = RangeFetcher::new(&feed, FetchOptions::default());

    let outcome = fetcher
        .fetch_range(
            &RepositoryRef::new("o", "r"),
            &VersionRange::new("v1.0.0", "v3.0.0"),
        )
        .await
        .unwrap();

    assert_eq!(tags(&outcome.releases), vec!["v3.0.0", "v2.0.0", "v1.0.0"]);
    assert_eq!(outcome.state.pages_fetched, 3);
}

#[test_log::test(tokio::test)]
async fn test_fetch_all_reads_until_last_page() {
    let releases = numbered_releases(65);

    let feed = mock_feed_for(releases, 3);
    let fetcher = RangeFetcher::new(&feed, FetchOptions::default());

    let all = fetcher
        .fetch_all(&RepositoryRef::new("o", "r"))
        .await
        .unwrap();

    assert_eq!(all.len(), 65);
}

#[test_log::test(tokio::test)]
async fn test_fetch_all_respects_page_bound() {
    let releases = numbered_releases(100);

    let feed = mock_feed_for(releases, 2);
    let fetcher = RangeFetcher::new(
        &feed,
        FetchOptions {
            page_size: 10,
            max_pages: 2,
        },
    );

    let all = fetcher
        .fetch_all(&RepositoryRef::new("o", "r"))
        .await
        .unwrap();

    assert_eq!(all.len(), 20);
}
