//! Version ranges and slicing release lists down to them.
//!
//! A range `from..to` selects every release newer than `from` up to and
//! including `to`. `from` marks "changes since" and must name a real
//! release; `to` may be the [`LATEST`] sentinel.
use log::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::{
    error::{ChangelogError, Result},
    forge::types::Release,
    version::{
        LATEST, SortDirection, VersionKey, display_version, sort_releases,
    },
};

/// Two release tags bounding a requested changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRange {
    pub from: String,
    pub to: String,
}

impl VersionRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn to_is_latest(&self) -> bool {
        self.to == LATEST
    }

    /// Check both endpoints parse as versions. `from` is checked first so
    /// its error wins when both are malformed.
    pub fn validate(&self) -> Result<()> {
        VersionKey::parse(&self.from)?;

        if !self.to_is_latest() {
            VersionKey::parse(&self.to)?;
        }

        Ok(())
    }
}

/// Slice `releases` down to the range, ordered by `direction`.
///
/// Releases are sorted descending, `to` resolves to its position (or the
/// newest release for [`LATEST`], or when it is absent from the list) and
/// `from` must be present. The result is the descending slice between them:
/// `to` included, `from` excluded. An inverted range is empty, not an error.
pub fn filter_by_range(
    releases: &[Release],
    range: &VersionRange,
    direction: SortDirection,
) -> Result<Vec<Release>> {
    range.validate()?;

    for release in releases {
        if VersionKey::parse(&release.tag).is_err() {
            warn!("skipping release with unparseable tag: {}", release.tag);
        }
    }

    let mut sorted = dedupe_by_tag(releases);
    sort_releases(&mut sorted, SortDirection::Desc);

    let from_index = sorted
        .iter()
        .position(|r| r.tag == range.from)
        .ok_or_else(|| ChangelogError::invalid_version(&range.from))?;

    let to_index = if range.to_is_latest() {
        0
    } else {
        match sorted.iter().position(|r| r.tag == range.to) {
            Some(idx) => idx,
            None => {
                warn!(
                    "release {} not found: treating range as open-ended upward",
                    range.to
                );
                0
            }
        }
    };

    if to_index >= from_index {
        debug!(
            "range {}..{} is empty: to index {to_index} >= from index {from_index}",
            range.from, range.to
        );
        return Ok(vec![]);
    }

    let mut selected = sorted[to_index..from_index].to_vec();

    if direction == SortDirection::Asc {
        selected.reverse();
    }

    Ok(selected)
}

/// Keep one release per tag, preferring the later-published copy. The first
/// copy wins a tie.
fn dedupe_by_tag(releases: &[Release]) -> Vec<Release> {
    let mut unique: Vec<Release> = Vec::with_capacity(releases.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for release in releases {
        match index.get(release.tag.as_str()) {
            Some(&idx) => {
                debug!("duplicate release tag: {}", release.tag);
                if release.published_at > unique[idx].published_at {
                    unique[idx] = release.clone();
                }
            }
            None => {
                index.insert(release.tag.as_str(), unique.len());
                unique.push(release.clone());
            }
        }
    }

    unique
}

/// Selectable endpoints for a repository's releases.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RangeOptions {
    pub from: Vec<Release>,
    pub to: Vec<Release>,
}

/// Build the `from` and `to` choices for a release list.
///
/// `from` drops the newest release so at least one release always lies
/// above it (unless only one exists). `to` is prefixed with a synthetic
/// [`LATEST`] release whose display name carries the newest version.
pub fn range_options(releases: &[Release]) -> RangeOptions {
    if releases.is_empty() {
        return RangeOptions::default();
    }

    let mut sorted = dedupe_by_tag(releases);
    sort_releases(&mut sorted, SortDirection::Desc);

    let from = if sorted.len() == 1 {
        sorted.clone()
    } else {
        sorted[1..].to_vec()
    };

    let newest = &sorted[0];
    let latest = Release {
        tag: LATEST.to_string(),
        display_name: format!("Latest ({})", display_version(newest)),
        ..newest.clone()
    };

    let mut to = Vec::with_capacity(sorted.len() + 1);
    to.push(latest);
    to.extend(sorted);

    RangeOptions { from, to }
}
