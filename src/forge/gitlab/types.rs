use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::forge::types::Release;

#[derive(Debug, Default, Deserialize)]
pub struct GitlabReleaseLinks {
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

/// Release as returned by `GET /projects/:id/releases`.
#[derive(Debug, Deserialize)]
pub struct GitlabRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub released_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", default)]
    pub links: Option<GitlabReleaseLinks>,
}

impl From<GitlabRelease> for Release {
    fn from(release: GitlabRelease) -> Self {
        Release {
            tag: release.tag_name,
            display_name: release.name.unwrap_or_default(),
            published_at: release.released_at,
            html_url: release
                .links
                .and_then(|l| l.self_url)
                .unwrap_or_default(),
            body_markdown: release.description.unwrap_or_default(),
        }
    }
}
