//! Local release feed for offline development and testing.
//!
//! Serves releases loaded from a JSON fixture through the pager, the same
//! way a forge API pages its release list.
use async_trait::async_trait;
use log::*;
use std::path::Path;
use tokio::fs;

use crate::{
    error::{ChangelogError, Result},
    forge::{
        traits::ReleaseFeed,
        types::{Release, ReleasePage, RepositoryRef},
    },
    pager::paginate,
    version::{SortDirection, sort_releases},
};

/// Feed over an in-memory release list, newest first.
pub struct LocalFeed {
    releases: Vec<Release>,
}

impl LocalFeed {
    /// Build a feed from releases in any order.
    pub fn new(mut releases: Vec<Release>) -> Self {
        sort_releases(&mut releases, SortDirection::Desc);
        Self { releases }
    }

    /// Load a JSON array of release records.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|err| {
            ChangelogError::invalid_config(format!(
                "failed to read release fixture {}: {err}",
                path.display()
            ))
        })?;

        let releases: Vec<Release> = serde_json::from_str(&content)?;

        info!(
            "loaded {} release(s) from fixture {}",
            releases.len(),
            path.display()
        );

        Ok(Self::new(releases))
    }
}

#[async_trait]
impl ReleaseFeed for LocalFeed {
    fn name(&self) -> String {
        "local".into()
    }

    async fn fetch_release_page(
        &self,
        repo: &RepositoryRef,
        page: u64,
        per_page: u8,
    ) -> Result<ReleasePage> {
        let page_index = usize::try_from(page).unwrap_or(usize::MAX);
        let page = paginate(&self.releases, per_page as usize, page_index);

        debug!(
            "local feed serving {} release(s) for {repo}, has next: {}",
            page.items.len(),
            page.has_next
        );

        Ok(ReleasePage {
            releases: page.items,
            has_next: page.has_next,
        })
    }
}
