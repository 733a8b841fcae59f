//! Implements the ReleaseFeed trait for Gitea
use async_trait::async_trait;
use log::*;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use std::sync::LazyLock;
use url::Url;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        traits::ReleaseFeed,
        types::{Release, ReleasePage, RepositoryRef},
    },
};

mod types;

use types::GiteaRelease;

static NEXT_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[^>]+>\s*;\s*rel="next""#).unwrap()
});

/// Gitea signals more pages with `x-hasmore` and, on newer versions, a
/// `Link` header carrying `rel="next"`.
fn has_next_page(headers: &HeaderMap) -> bool {
    let has_more = headers
        .get("x-hasmore")
        .and_then(|h| h.to_str().ok())
        .map(|h| h == "true")
        .unwrap_or(false);

    let next_link = headers
        .get_all("link")
        .iter()
        .filter_map(|h| h.to_str().ok())
        .any(|h| NEXT_LINK_REGEX.is_match(h));

    has_more || next_link
}

/// Release feed backed by the Gitea (and Forgejo) releases API.
pub struct Gitea {
    client: reqwest::Client,
    base_url: Url,
}

impl Gitea {
    /// Create Gitea client with optional token authentication and API base
    /// URL configuration for self-hosted instances.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = config.token.as_ref() {
            let token_value = HeaderValue::from_str(
                format!("token {}", token.expose_secret()).as_str(),
            )?;
            headers.append("Authorization", token_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(&format!("{}/api/v1/", config.origin()))?;

        Ok(Self { client, base_url })
    }

    fn releases_url(
        &self,
        repo: &RepositoryRef,
        page: u64,
        per_page: u8,
    ) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("repos/{}/{}/releases", repo.owner, repo.name))?;

        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &per_page.to_string());

        Ok(url)
    }
}

#[async_trait]
impl ReleaseFeed for Gitea {
    fn name(&self) -> String {
        "gitea".into()
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
        let releases: Vec<GiteaRelease> = result.json().await?;

        let releases = releases
            .into_iter()
            .filter(|r| !r.draft)
            .map(Release::from)
            .collect::<Vec<_>>();

        debug!(
            "gitea returned {} release(s) for {repo} page {page}, has next: {has_next}",
            releases.len()
        );

        Ok(ReleasePage { releases, has_next })
    }
}
