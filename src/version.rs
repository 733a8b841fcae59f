//! Semantic ordering of release tags.
//!
//! Tags are reduced to a [`VersionKey`] by stripping any leading non-numeric
//! prefix (`v`, `release-`, ...) and parsing the remainder as
//! `major.minor.patch[-prerelease]`. Keys order newest-last, so sorting
//! descending puts the newest release first.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{
    error::{ChangelogError, Result},
    forge::types::Release,
};

/// Sentinel `to` endpoint meaning "the newest known release".
pub const LATEST: &str = "latest";

/// Sort direction for version ordering. Descending means newest first.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Apply this direction to an ascending ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Ordered semantic key derived from a release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKey {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<semver::Prerelease>,
}

impl VersionKey {
    /// Parse a tag into a version key.
    pub fn parse(tag: &str) -> Result<Self> {
        let stripped = tag.trim_start_matches(|c: char| !c.is_ascii_digit());

        let version = semver::Version::parse(stripped)
            .map_err(|_| ChangelogError::invalid_version(tag))?;

        // only major.minor.patch[-prerelease] is a release tag
        if !version.build.is_empty() {
            return Err(ChangelogError::invalid_version(tag));
        }

        let prerelease = if version.pre.is_empty() {
            None
        } else {
            Some(version.pre)
        };

        Ok(Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            prerelease,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                // a stable release outranks any prerelease of the same version
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two tags. With [`SortDirection::Desc`] the newer tag orders
/// first, so the result can be passed straight to `sort_by`.
pub fn compare_versions(
    a: &str,
    b: &str,
    direction: SortDirection,
) -> Result<Ordering> {
    let a = VersionKey::parse(a)?;
    let b = VersionKey::parse(b)?;
    Ok(direction.apply(a.cmp(&b)))
}

/// Infallible release comparator for sorting feeds. Releases whose tag does
/// not parse always order after every parseable release, whatever the
/// direction, and keep their relative order among themselves.
pub fn compare_releases(
    a: &Release,
    b: &Release,
    direction: SortDirection,
) -> Ordering {
    match (VersionKey::parse(&a.tag), VersionKey::parse(&b.tag)) {
        (Ok(a), Ok(b)) => direction.apply(a.cmp(&b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

/// Sort releases in place by version using a stable sort.
pub fn sort_releases(releases: &mut [Release], direction: SortDirection) {
    releases.sort_by(|a, b| compare_releases(a, b, direction));
}

/// True only for tags that parse and carry no prerelease component. Used for
/// display badges, so unparseable tags are simply not stable.
pub fn is_stable_release(release: &Release) -> bool {
    VersionKey::parse(&release.tag)
        .map(|key| !key.is_prerelease())
        .unwrap_or(false)
}

/// Version label to show for a release. The synthetic `latest` release
/// carries its real version in the display name.
pub fn display_version(release: &Release) -> String {
    if release.tag == LATEST {
        if release.display_name.is_empty() {
            return LATEST.to_string();
        }
        return release.display_name.clone();
    }

    release.tag.clone()
}
