//! Lists the versions selectable as range endpoints
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    cli::validate_repository,
    command::common::write_output,
    comparator::Comparator,
    config::Config,
    error::Result,
    forge::{
        traits::ReleaseFeed,
        types::{Release, RepositoryRef},
    },
    version::{display_version, is_stable_release},
};

/// One selectable endpoint.
#[derive(Debug, Serialize)]
struct EndpointOption {
    tag: String,
    label: String,
    stable: bool,
    published_at: Option<DateTime<Utc>>,
}

impl From<&Release> for EndpointOption {
    fn from(release: &Release) -> Self {
        Self {
            tag: release.tag.clone(),
            label: display_version(release),
            stable: is_stable_release(release),
            published_at: release.published_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct EndpointOptions {
    from: Vec<EndpointOption>,
    to: Vec<EndpointOption>,
}

/// Fetch every release and return the endpoint options as JSON.
pub async fn run(
    feed: &dyn ReleaseFeed,
    repo: &str,
    config: &Config,
) -> Result<String> {
    let repo = RepositoryRef::from_slug(repo);
    validate_repository(&repo)?;

    let comparator =
        Comparator::new(feed, config.fetch_options(), config.direction);

    let options = comparator.range_options(&repo).await?;

    let output = EndpointOptions {
        from: options.from.iter().map(EndpointOption::from).collect(),
        to: options.to.iter().map(EndpointOption::from).collect(),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

pub async fn execute(
    feed: &dyn ReleaseFeed,
    repo: &str,
    out_file: Option<&str>,
    config: &Config,
) -> Result<()> {
    let output = run(feed, repo, config).await?;
    write_output(&output, out_file).await
}
