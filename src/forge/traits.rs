//! Traits related to remote release feeds
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::types::{ReleasePage, RepositoryRef},
};

/// Forward-only, newest-first, paginated source of releases.
///
/// Implementations perform exactly one request per call and surface
/// transport failures unchanged; retrying is left to the transport itself.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    /// Human readable forge name for log output.
    fn name(&self) -> String;

    /// Fetch page `page` (1-based) holding at most `per_page` releases.
    async fn fetch_release_page(
        &self,
        repo: &RepositoryRef,
        page: u64,
        per_page: u8,
    ) -> Result<ReleasePage>;
}
