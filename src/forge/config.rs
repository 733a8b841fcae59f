//! Configuration for release feed connections.
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, path::PathBuf};

use crate::{
    error::Result,
    forge::{
        gitea::Gitea, github::Github, gitlab::Gitlab, local::LocalFeed,
        traits::ReleaseFeed,
    },
};

/// Default GitHub host.
pub const DEFAULT_GITHUB_HOST: &str = "github.com";
/// Default Gitea host.
pub const DEFAULT_GITEA_HOST: &str = "gitea.com";
/// Default GitLab host.
pub const DEFAULT_GITLAB_HOST: &str = "gitlab.com";

/// Supported release feed platforms.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ForgeKind {
    #[default]
    Github,
    Gitea,
    Gitlab,
    Local,
}

impl ForgeKind {
    pub fn default_host(&self) -> &'static str {
        match self {
            ForgeKind::Github => DEFAULT_GITHUB_HOST,
            ForgeKind::Gitea => DEFAULT_GITEA_HOST,
            ForgeKind::Gitlab => DEFAULT_GITLAB_HOST,
            ForgeKind::Local => "",
        }
    }

    /// Environment variable consulted for a token when none is passed.
    pub fn token_env_var(&self) -> Option<&'static str> {
        match self {
            ForgeKind::Github => Some("GITHUB_TOKEN"),
            ForgeKind::Gitea => Some("GITEA_TOKEN"),
            ForgeKind::Gitlab => Some("GITLAB_TOKEN"),
            ForgeKind::Local => None,
        }
    }
}

impl Display for ForgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ForgeKind::Github => "github",
            ForgeKind::Gitea => "gitea",
            ForgeKind::Gitlab => "gitlab",
            ForgeKind::Local => "local",
        };
        f.write_str(name)
    }
}

/// Connection settings for a remote forge.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// Remote forge port for self-hosted instances.
    pub port: Option<u16>,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Optional access token. Public release feeds need none.
    pub token: Option<SecretString>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GITHUB_HOST.to_string(),
            port: None,
            scheme: "https".to_string(),
            token: None,
        }
    }
}

impl RemoteConfig {
    /// `scheme://host[:port]` without a trailing slash.
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

/// A configured release feed source.
#[derive(Debug, Clone)]
pub enum Remote {
    Github(RemoteConfig),
    Gitea(RemoteConfig),
    Gitlab(RemoteConfig),
    /// JSON fixture file holding an array of releases.
    Local(PathBuf),
}

impl Remote {
    /// Create the feed client for the configured platform.
    pub async fn get_feed(&self) -> Result<Box<dyn ReleaseFeed>> {
        match self {
            Remote::Github(config) => {
                let feed = Github::new(config.clone())?;
                Ok(Box::new(feed))
            }
            Remote::Gitea(config) => {
                let feed = Gitea::new(config.clone())?;
                Ok(Box::new(feed))
            }
            Remote::Gitlab(config) => {
                let feed = Gitlab::new(config.clone())?;
                Ok(Box::new(feed))
            }
            Remote::Local(path) => {
                let feed = LocalFeed::from_file(path).await?;
                Ok(Box::new(feed))
            }
        }
    }
}
