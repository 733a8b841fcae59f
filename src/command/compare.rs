//! Resolves a version range and prints the combined changelog
use log::*;

use crate::{
    changelog::render::render,
    cli::CompareArgs,
    command::common::write_output,
    comparator::Comparator,
    config::Config,
    error::Result,
    forge::traits::ReleaseFeed,
};

/// Run the comparison and return the rendered output.
pub async fn run(
    feed: &dyn ReleaseFeed,
    cmd: &CompareArgs,
    config: &Config,
) -> Result<String> {
    let (repo, range) = cmd.resolve()?;

    let comparator =
        Comparator::new(feed, config.fetch_options(), config.direction);

    let comparison = comparator.compare(&repo, &range).await?;

    if comparison.is_empty() {
        warn!(
            "no releases found between {} and {}",
            comparison.from_label, comparison.to_label
        );
    }

    render(&comparison, cmd.format, &config.template)
}

pub async fn execute(
    feed: &dyn ReleaseFeed,
    cmd: &CompareArgs,
    config: &Config,
) -> Result<()> {
    let output = run(feed, cmd, config).await?;
    write_output(&output, cmd.out_file.as_deref()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        changelog::render::OutputFormat,
        error::ChangelogError,
        forge::local::LocalFeed,
        test_helpers::release_with_body,
    };
    use tempfile::TempDir;
    use tokio::fs;

    fn feed() -> LocalFeed {
        LocalFeed::new(vec![
            release_with_body("v1.0.0", "## Features\n\n- first\n"),
            release_with_body("v1.1.0", "## Bug Fixes\n\n- patch it\n"),
            release_with_body(
                "v1.2.0",
                "## Features\n\n- second\n\n## Credits\n\n- @dev\n",
            ),
        ])
    }

    #[tokio::test]
    async fn test_compare_renders_markdown() {
        let cmd = CompareArgs {
            repo: Some("test/repo".into()),
            from: Some("v1.0.0".into()),
            ..CompareArgs::default()
        };

        let output = run(&feed(), &cmd, &Config::default()).await.unwrap();

        assert!(output.starts_with("# Changes from v1.0.0 to Latest (v1.2.0)"));
        let features = output.find("## Features").unwrap();
        let fixes = output.find("## Bug Fixes").unwrap();
        let credits = output.find("## Credits").unwrap();
        assert!(features < fixes && fixes < credits);
        assert!(!output.contains("- first"));
    }

    #[tokio::test]
    async fn test_compare_from_query_renders_json() {
        let cmd = CompareArgs {
            query: Some("?repo=test%2Frepo&from=v1.0.0&to=v1.1.0".into()),
            format: OutputFormat::Json,
            ..CompareArgs::default()
        };

        let output = run(&feed(), &cmd, &Config::default()).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["releases"], serde_json::json!(["v1.1.0"]));
        assert_eq!(value["document"]["groups"][0]["group"], "bug fixes");
    }

    #[tokio::test]
    async fn test_compare_empty_range_message() {
        let cmd = CompareArgs {
            repo: Some("test/repo".into()),
            from: Some("v1.2.0".into()),
            to: Some("v1.0.0".into()),
            ..CompareArgs::default()
        };

        let output = run(&feed(), &cmd, &Config::default()).await.unwrap();

        assert_eq!(output, "No releases between v1.2.0 and v1.0.0 in test/repo");
    }

    #[tokio::test]
    async fn test_compare_unknown_from_fails() {
        let cmd = CompareArgs {
            repo: Some("test/repo".into()),
            from: Some("v0.1.0".into()),
            ..CompareArgs::default()
        };

        let err = run(&feed(), &cmd, &Config::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid Version: v0.1.0");
    }

    #[tokio::test]
    async fn test_execute_writes_out_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("changes.md");
        let cmd = CompareArgs {
            repo: Some("test/repo".into()),
            from: Some("v1.1.0".into()),
            out_file: Some(out.to_string_lossy().to_string()),
            ..CompareArgs::default()
        };

        execute(&feed(), &cmd, &Config::default()).await.unwrap();

        let content = fs::read_to_string(&out).await.unwrap();
        assert!(content.contains("### [v1.2.0]"));
    }

    #[tokio::test]
    async fn test_compare_requires_repository() {
        let cmd = CompareArgs {
            from: Some("v1.0.0".into()),
            ..CompareArgs::default()
        };

        let result = run(&feed(), &cmd, &Config::default()).await;

        assert!(matches!(result, Err(ChangelogError::InvalidArgs(_))));
    }
}
