//! Resolves a version range for a repository into a combined changelog.
//!
//! A comparison runs fetch, range filter and aggregation in sequence. Callers
//! that may start a new comparison before an older one finishes tag each run
//! with a [`ResolutionTicket`] and only keep results whose ticket is still
//! current.
use log::*;
use serde::{Serialize, Serializer};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    changelog::aggregate::{CombinedDocument, aggregate},
    error::Result,
    fetch::{FetchOptions, RangeFetcher},
    forge::{
        traits::ReleaseFeed,
        types::{Release, RepositoryRef},
    },
    range::{RangeOptions, VersionRange, filter_by_range, range_options},
    version::{SortDirection, display_version},
};

fn serialize_tags<S>(
    releases: &[Release],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(releases.iter().map(|r| r.tag.as_str()))
}

/// Outcome of a successful comparison. An empty range is a valid outcome,
/// told apart by [`Comparison::is_empty`].
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub repository: RepositoryRef,
    pub range: VersionRange,
    /// Label for the lower endpoint.
    pub from_label: String,
    /// Label for the upper endpoint; the newest version for `latest`.
    pub to_label: String,
    /// Releases inside the range, in document order.
    #[serde(serialize_with = "serialize_tags")]
    pub releases: Vec<Release>,
    pub document: CombinedDocument,
}

impl Comparison {
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

/// Label an endpoint the way a range picker shows it.
fn endpoint_label(tag: &str, releases: &[Release]) -> String {
    let options = range_options(releases);

    options
        .to
        .iter()
        .find(|r| r.tag == tag)
        .map(display_version)
        .unwrap_or_else(|| tag.to_string())
}

/// Issues monotonically increasing resolution generations. Clones share the
/// same counter.
#[derive(Debug, Default, Clone)]
pub struct ResolutionTracker {
    generation: Arc<AtomicU64>,
}

impl ResolutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new resolution, superseding every earlier ticket.
    pub fn begin(&self) -> ResolutionTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        ResolutionTicket {
            generation,
            tracker: self.clone(),
        }
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Handle for one resolution. Results are only committed while it is the
/// newest ticket issued by its tracker.
#[derive(Debug, Clone)]
pub struct ResolutionTicket {
    generation: u64,
    tracker: ResolutionTracker,
}

impl ResolutionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.tracker.current() == self.generation
    }

    /// Store `value` into `slot` if this ticket is still current. Returns
    /// whether the value was committed.
    pub fn commit<T>(&self, slot: &mut Option<T>, value: T) -> bool {
        if !self.is_current() {
            debug!(
                "discarding stale resolution {} (current is {})",
                self.generation,
                self.tracker.current()
            );
            return false;
        }

        *slot = Some(value);
        true
    }
}

/// Runs comparisons against one release feed.
pub struct Comparator<'f> {
    fetcher: RangeFetcher<'f>,
    direction: SortDirection,
}

impl<'f> Comparator<'f> {
    pub fn new(
        feed: &'f dyn ReleaseFeed,
        options: FetchOptions,
        direction: SortDirection,
    ) -> Self {
        Self {
            fetcher: RangeFetcher::new(feed, options),
            direction,
        }
    }

    /// Resolve `range` for `repo` into a combined changelog.
    ///
    /// Malformed endpoints fail before any page is requested. Fetch failures
    /// abort the whole comparison; no partial document is returned.
    pub async fn compare(
        &self,
        repo: &RepositoryRef,
        range: &VersionRange,
    ) -> Result<Comparison> {
        range.validate()?;

        info!("comparing {repo} releases {}..{}", range.from, range.to);

        let outcome = self.fetcher.fetch_range(repo, range).await?;
        let releases = filter_by_range(&outcome.releases, range, self.direction)?;
        let document = aggregate(&releases);

        info!(
            "{} release(s) in range, {} group(s)",
            releases.len(),
            document.groups.len()
        );

        Ok(Comparison {
            repository: repo.clone(),
            range: range.clone(),
            from_label: endpoint_label(&range.from, &outcome.releases),
            to_label: endpoint_label(&range.to, &outcome.releases),
            releases,
            document,
        })
    }

    /// Like [`Comparator::compare`], but yields `None` when `ticket` was
    /// superseded while the comparison ran. Errors from a superseded
    /// resolution are dropped as well.
    pub async fn compare_tracked(
        &self,
        ticket: &ResolutionTicket,
        repo: &RepositoryRef,
        range: &VersionRange,
    ) -> Result<Option<Comparison>> {
        let result = self.compare(repo, range).await;

        if !ticket.is_current() {
            if let Err(err) = &result {
                debug!(
                    "ignoring error from stale resolution {}: {err}",
                    ticket.generation()
                );
            }
            return Ok(None);
        }

        let mut slot = None;
        ticket.commit(&mut slot, result?);

        Ok(slot)
    }

    /// List every release and build the selectable range endpoints.
    pub async fn range_options(
        &self,
        repo: &RepositoryRef,
    ) -> Result<RangeOptions> {
        let releases = self.fetcher.fetch_all(repo).await?;
        Ok(range_options(&releases))
    }
}
