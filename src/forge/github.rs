//! Implements the ReleaseFeed trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, models::repos::Release as GithubRelease};

use crate::{
    error::{ChangelogError, Result},
    forge::{
        config::{DEFAULT_GITHUB_HOST, RemoteConfig},
        traits::ReleaseFeed,
        types::{Release, ReleasePage, RepositoryRef},
    },
};

/// GitHub REST API base for a host. github.com serves its API from a
/// dedicated subdomain, Enterprise hosts under `/api/v3`.
fn api_base_uri(config: &RemoteConfig) -> String {
    if config.host == DEFAULT_GITHUB_HOST {
        return format!("{}://api.{}", config.scheme, config.host);
    }

    format!("{}/api/v3", config.origin())
}

fn into_release(release: GithubRelease) -> Release {
    Release {
        tag: release.tag_name,
        display_name: release.name.unwrap_or_default(),
        published_at: release.published_at,
        html_url: release.html_url.to_string(),
        body_markdown: release.body.unwrap_or_default(),
    }
}

/// Release feed backed by the GitHub releases API.
pub struct Github {
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client, authenticated when a token is configured.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = api_base_uri(&config);
        let mut builder = Octocrab::builder().base_uri(base_uri)?;

        if let Some(token) = config.token.clone() {
            builder = builder.personal_token(token);
        }

        let instance = builder.build()?;

        Ok(Self { instance })
    }
}

#[async_trait]
impl ReleaseFeed for Github {
    fn name(&self) -> String {
        "github".into()
    }

    async fn fetch_release_page(
        &self,
        repo: &RepositoryRef,
        page: u64,
        per_page: u8,
    ) -> Result<ReleasePage> {
        let page_number = u32::try_from(page).map_err(|_| {
            ChangelogError::fetch(format!("page index out of range: {page}"))
        })?;

        let result = self
            .instance
            .repos(&repo.owner, &repo.name)
            .releases()
            .list()
            .per_page(per_page)
            .page(page_number)
            .send()
            .await?;

        let has_next = result.next.is_some();

        let releases = result
            .items
            .into_iter()
            .filter(|r| {
                if r.draft {
                    debug!("skipping draft release: {}", r.tag_name);
                }
                !r.draft
            })
            .map(into_release)
            .collect::<Vec<_>>();

        debug!(
            "github returned {} release(s) for {repo} page {page}, has next: {has_next}",
            releases.len()
        );

        Ok(ReleasePage { releases, has_next })
    }
}
