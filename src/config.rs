//! Configuration loading and parsing for `release-range.toml` files.
use log::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::{
    changelog::render::DEFAULT_TEMPLATE,
    error::{ChangelogError, Result},
    fetch::{DEFAULT_MAX_PAGES, FetchOptions},
    pager::DEFAULT_PAGE_SIZE,
    version::SortDirection,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "release-range.toml";

/// Largest page size accepted by the supported forge APIs.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Root configuration structure for `release-range.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)] // Use default for missing fields
pub struct Config {
    /// Releases requested per feed page (1-100).
    pub page_size: u8,
    /// Maximum number of pages fetched while resolving one range.
    pub max_pages: u64,
    /// Order of releases inside each changelog group.
    pub direction: SortDirection,
    /// Tera template used for markdown output.
    pub template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            direction: SortDirection::default(),
            template: DEFAULT_TEMPLATE.into(),
        }
    }
}

impl Config {
    /// Parse and validate TOML configuration content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] in the
    /// working directory. A missing default file yields the defaults; a
    /// missing explicit file is an error.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !fs::try_exists(path).await.unwrap_or(false) {
            if explicit {
                return Err(ChangelogError::invalid_config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }

            debug!("no {DEFAULT_CONFIG_FILE} found: using default configuration");
            return Ok(Self::default());
        }

        info!("loading configuration from {}", path.display());

        let content = fs::read_to_string(path).await?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ChangelogError::invalid_config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }

        if self.max_pages == 0 {
            return Err(ChangelogError::invalid_config(
                "max_pages must be at least 1",
            ));
        }

        Ok(())
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            page_size: self.page_size,
            max_pages: self.max_pages,
        }
    }
}
