//! Implements the ReleaseFeed trait for Gitlab
use async_trait::async_trait;
use log::*;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use url::{Url, form_urlencoded};

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        traits::ReleaseFeed,
        types::{Release, ReleasePage, RepositoryRef},
    },
};

mod types;

use types::GitlabRelease;

/// GitLab leaves `x-next-page` empty on the last page.
fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get("x-next-page")
        .and_then(|h| h.to_str().ok())
        .map(|h| !h.trim().is_empty())
        .unwrap_or(false)
}

/// URL-encoded project path, used as the project id in API routes.
fn project_id(repo: &RepositoryRef) -> String {
    form_urlencoded::byte_serialize(repo.slug().as_bytes()).collect()
}

/// Release feed backed by the GitLab releases API.
pub struct Gitlab {
    client: reqwest::Client,
    origin: String,
}

impl Gitlab {
    /// Create GitLab client for gitlab.com or a self-hosted instance.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = config.token.as_ref() {
            let token_value = HeaderValue::from_str(token.expose_secret())?;
            headers.append("PRIVATE-TOKEN", token_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            origin: config.origin(),
        })
    }

    fn releases_url(
        &self,
        repo: &RepositoryRef,
        page: u64,
        per_page: u8,
    ) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/api/v4/projects/{}/releases",
            self.origin,
            project_id(repo)
        ))?;

        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        Ok(url)
    }
}

#[async_trait]
impl ReleaseFeed for Gitlab {
    fn name(&self) -> String {
        "gitlab".into()
    }

    async fn fetch_release_page(
        &self,
        repo: &RepositoryRef,
        page: u64,
        per_page: u8,
    ) -> Result<ReleasePage> {
        let url = self.releases_url(repo, page, per_page)?;

        let request = self.client.get(url).build()?;
        let response = self.client.execute(request).await?;
        let result = response.error_for_status()?;

        let has_next = has_next_page(result.headers());
        let releases: Vec<GitlabRelease> = result.json().await?;
        let releases = releases
            .into_iter()
            .map(Release::from)
            .collect::<Vec<_>>();

        debug!(
            "gitlab returned {} release(s) for {repo} page {page}, has next: {has_next}",
            releases.len()
        );

        Ok(ReleasePage { releases, has_next })
    }
}
