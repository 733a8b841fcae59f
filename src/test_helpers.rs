//! Common test helper functions shared across test modules.
//!
//! Builds release fixtures and feed pages so individual suites stay focused
//! on the behavior under test.
use secrecy::SecretString;

use crate::forge::{
    config::RemoteConfig,
    types::{Release, ReleasePage},
};

/// Creates a test RemoteConfig pointing at github.com with a dummy token.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        port: None,
        scheme: "https".to_string(),
        token: Some(SecretString::from("test-token".to_string())),
    }
}

/// Creates a release with the given tag and an empty body.
///
/// # Example
/// ```ignore
/// let release = release("v1.0.0");
/// ```
pub fn release(tag: &str) -> Release {
    Release {
        tag: tag.to_string(),
        display_name: tag.to_string(),
        published_at: None,
        html_url: format!("https://github.com/test/repo/releases/tag/{tag}"),
        body_markdown: String::new(),
    }
}

/// Creates a release with the given tag and markdown body.
pub fn release_with_body(tag: &str, body: &str) -> Release {
    Release {
        body_markdown: body.to_string(),
        ..release(tag)
    }
}

/// Creates releases for each tag, keeping the given order.
pub fn releases(tags: &[&str]) -> Vec<Release> {
    tags.iter().map(|t| release(t)).collect()
}

/// Tags of the given releases, in order.
pub fn tags(releases: &[Release]) -> Vec<&str> {
    releases.iter().map(|r| r.tag.as_str()).collect()
}

/// A feed page holding releases for `tags`.
pub fn page_of(tags: &[&str], has_next: bool) -> ReleasePage {
    ReleasePage {
        releases: releases(tags),
        has_next,
    }
}

/// `count` distinct releases, newest first. The oldest tag is `v1.0.0`, so
/// `v0.0.1` never appears.
pub fn numbered_releases(count: usize) -> Vec<Release> {
    (0..count)
        .map(|i| {
            let idx = count - 1 - i;
            release(&format!(
                "v{}.{}.{}",
                idx / 100 + 1,
                (idx / 10) % 10,
                idx % 10
            ))
        })
        .collect()
}
