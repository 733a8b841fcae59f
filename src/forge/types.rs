//! Shared data types for repositories and release feeds.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Immutable identifier of a repository on a forge.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

/// Owner portion of a structured repository record as returned by forge
/// search APIs.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: Option<String>,
}

/// Structured repository record. Every field is optional so partially
/// populated records still map to a [`RepositoryRef`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RepositoryRecord {
    pub owner: Option<RepositoryOwner>,
    pub name: Option<String>,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Map an optional structured record, defaulting missing parts to empty
    /// strings.
    pub fn from_record(record: Option<&RepositoryRecord>) -> Self {
        let Some(record) = record else {
            return Self::default();
        };

        let owner = record
            .owner
            .as_ref()
            .and_then(|o| o.login.clone())
            .unwrap_or_default();

        Self {
            owner,
            name: record.name.clone().unwrap_or_default(),
        }
    }

    /// Split an `owner/name` slug on the first `/`. Never fails: missing
    /// parts become empty strings.
    pub fn from_slug(slug: &str) -> Self {
        match slug.split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => Self::new(slug, ""),
        }
    }

    /// `owner/name` form used in API paths and log output
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty() && self.name.is_empty()
    }
}

impl Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.slug())
    }
}

/// A published release as reported by a forge. Identity is `tag`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Tag name the release points to, e.g. `v1.2.3`.
    #[serde(alias = "tag_name")]
    pub tag: String,
    /// Human readable release name. May be empty.
    #[serde(default, alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: String,
    /// Raw markdown release notes. May be empty.
    #[serde(default, alias = "body")]
    pub body_markdown: String,
}

/// One page of releases, newest first, as returned by a single feed request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReleasePage {
    pub releases: Vec<Release>,
    pub has_next: bool,
}
