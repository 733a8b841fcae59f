use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::forge::types::Release;

/// Release as returned by `GET /repos/{owner}/{repo}/releases`.
#[derive(Debug, Deserialize)]
pub struct GiteaRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub draft: bool,
}

impl From<GiteaRelease> for Release {
    fn from(release: GiteaRelease) -> Self {
        Release {
            tag: release.tag_name,
            display_name: release.name.unwrap_or_default(),
            published_at: release.published_at,
            html_url: release.html_url.unwrap_or_default(),
            body_markdown: release.body.unwrap_or_default(),
        }
    }
}
