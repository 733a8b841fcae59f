//! Command execution for release-range.
//!
//! Each command loads configuration, builds the release feed for the
//! selected forge and runs one comparison or listing against it.
use log::*;

use crate::{
    cli::{Args, Command},
    config::Config,
    error::Result,
};

/// Shared output handling used by every command.
pub mod common;

/// Combine release notes across a version range.
pub mod compare;

/// List selectable range endpoints.
pub mod releases;

/// Load configuration, apply CLI overrides and dispatch the subcommand.
pub async fn execute(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).await?;
    let config = args.apply_overrides(config)?;

    debug!("effective configuration: {config:?}");

    let remote = args.get_remote()?;
    let feed = remote.get_feed().await?;

    match &args.command {
        Command::Compare(cmd) => {
            compare::execute(feed.as_ref(), cmd, &config).await
        }
        Command::Releases { repo, out_file } => {
            releases::execute(feed.as_ref(), repo, out_file.as_deref(), &config)
                .await
        }
    }
}
