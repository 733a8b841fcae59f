//! Range-aware release fetching.
//!
//! Pages are requested strictly one after another because the decision to
//! continue depends on everything seen so far. The stop logic lives in the
//! pure [`FetchState::step`] transition so it can be exercised without a
//! feed; [`RangeFetcher`] drives it against a [`ReleaseFeed`].
use log::*;
use std::collections::HashSet;

use crate::{
    error::{ChangelogError, Result},
    forge::{
        traits::ReleaseFeed,
        types::{Release, ReleasePage, RepositoryRef},
    },
    pager::DEFAULT_PAGE_SIZE,
    range::VersionRange,
};

/// Default safety bound on the number of pages requested for one range.
pub const DEFAULT_MAX_PAGES: u64 = 50;

/// What the driver should do after a page has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStep {
    /// Request the next page.
    Continue,
    /// Both endpoints have been seen.
    Resolved,
    /// The feed has no more pages.
    Exhausted,
}

/// Progress of one range fetch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchState {
    pub pages_fetched: u64,
    pub found_from: bool,
    pub found_to: bool,
    pub exhausted: bool,
}

impl FetchState {
    /// Start a fetch. A `latest` upper bound is satisfied before any page
    /// has been seen.
    pub fn new(range: &VersionRange) -> Self {
        Self {
            found_to: range.to_is_latest(),
            ..Self::default()
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.found_from && self.found_to
    }

    /// Apply one page and decide whether another one is needed.
    pub fn step(
        self,
        range: &VersionRange,
        page: &ReleasePage,
    ) -> (Self, FetchStep) {
        let found_from = self.found_from
            || page.releases.iter().any(|r| r.tag == range.from);
        let found_to =
            self.found_to || page.releases.iter().any(|r| r.tag == range.to);

        let state = Self {
            pages_fetched: self.pages_fetched + 1,
            found_from,
            found_to,
            exhausted: !page.has_next,
        };

        let next = if state.is_resolved() {
            FetchStep::Resolved
        } else if state.exhausted {
            FetchStep::Exhausted
        } else {
            FetchStep::Continue
        };

        (state, next)
    }
}

/// Releases gathered for a range together with how the fetch ended.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub releases: Vec<Release>,
    pub state: FetchState,
}

/// Paging parameters for a [`RangeFetcher`].
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub page_size: u8,
    pub max_pages: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Fetches just enough pages from a feed to resolve a [`VersionRange`].
pub struct RangeFetcher<'f> {
    feed: &'f dyn ReleaseFeed,
    options: FetchOptions,
}

impl<'f> RangeFetcher<'f> {
    pub fn new(feed: &'f dyn ReleaseFeed, options: FetchOptions) -> Self {
        Self { feed, options }
    }

    /// Fetch pages until both endpoints are seen or the feed runs out.
    ///
    /// An exhausted feed is not an error here: the range filter decides
    /// what a missing endpoint means. Reaching `max_pages` while the feed
    /// still has pages is [`ChangelogError::RangeUnresolved`].
    pub async fn fetch_range(
        &self,
        repo: &RepositoryRef,
        range: &VersionRange,
    ) -> Result<FetchOutcome> {
        let mut state = FetchState::new(range);
        let mut seen: HashSet<String> = HashSet::new();
        let mut releases: Vec<Release> = vec![];

        loop {
            if state.pages_fetched >= self.options.max_pages {
                error!(
                    "giving up on {repo} after {} page(s): from found: {}, to found: {}",
                    state.pages_fetched, state.found_from, state.found_to
                );
                return Err(ChangelogError::RangeUnresolved {
                    from: range.from.clone(),
                    to: range.to.clone(),
                    pages: state.pages_fetched,
                });
            }

            let page_index = state.pages_fetched + 1;

            info!(
                "fetching {} releases page {page_index} for {repo}",
                self.feed.name()
            );

            let page = self
                .feed
                .fetch_release_page(repo, page_index, self.options.page_size)
                .await?;

            let (next_state, step) = state.step(range, &page);
            state = next_state;

            for release in page.releases {
                if seen.insert(release.tag.clone()) {
                    releases.push(release);
                } else {
                    debug!("skipping duplicate release tag: {}", release.tag);
                }
            }

            match step {
                FetchStep::Continue => continue,
                FetchStep::Resolved => {
                    info!(
                        "resolved range {}..{} after {} page(s)",
                        range.from, range.to, state.pages_fetched
                    );
                    break;
                }
                FetchStep::Exhausted => {
                    warn!(
                        "release feed exhausted after {} page(s): from found: {}, to found: {}",
                        state.pages_fetched, state.found_from, state.found_to
                    );
                    break;
                }
            }
        }

        Ok(FetchOutcome { releases, state })
    }

    /// Fetch every page up to `max_pages`, for listing all releases.
    pub async fn fetch_all(&self, repo: &RepositoryRef) -> Result<Vec<Release>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut releases: Vec<Release> = vec![];
        let mut page_index = 1;

        while page_index <= self.options.max_pages {
            info!(
                "fetching {} releases page {page_index} for {repo}",
                self.feed.name()
            );

            let page = self
                .feed
                .fetch_release_page(repo, page_index, self.options.page_size)
                .await?;

            releases.extend(
                page.releases
                    .into_iter()
                    .filter(|r| seen.insert(r.tag.clone())),
            );

            if !page.has_next {
                return Ok(releases);
            }

            page_index += 1;
        }

        warn!(
            "stopped listing releases for {repo} at the {} page limit",
            self.options.max_pages
        );

        Ok(releases)
    }
}

#[cfg(test)]
mod tests;
