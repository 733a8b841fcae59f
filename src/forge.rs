//! Release feeds for forge platforms (GitHub, GitLab, Gitea) plus a local
//! fixture feed.
//!
//! Every feed serves one repository's releases newest first, one page per
//! request, behind the [`traits::ReleaseFeed`] trait.

/// Connection settings and feed construction.
pub mod config;

/// Gitea and Forgejo releases API client.
pub mod gitea;

/// GitHub releases API client for GitHub.com and Enterprise.
pub mod github;

/// GitLab releases API client for GitLab.com and self-hosted instances.
pub mod gitlab;

/// Fixture-backed feed for offline use.
pub mod local;

/// Common trait for release feed abstraction.
pub mod traits;

/// Shared data types for repositories and releases.
pub mod types;
