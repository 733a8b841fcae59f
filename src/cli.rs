//! CLI argument parsing and release feed configuration.
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    changelog::render::OutputFormat,
    config::Config,
    error::{ChangelogError, Result},
    forge::{
        config::{ForgeKind, Remote, RemoteConfig},
        types::RepositoryRef,
    },
    query::RangeQuery,
    range::VersionRange,
    version::{LATEST, SortDirection},
};

/// Global CLI arguments for feed configuration and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_enum, default_value_t = ForgeKind::Github, global = true)]
    /// Forge hosting the repository's releases.
    pub forge: ForgeKind,

    #[arg(long, global = true)]
    /// Forge host for self-hosted instances. Defaults per forge.
    pub host: Option<String>,

    #[arg(long, global = true)]
    /// Forge port for self-hosted instances.
    pub port: Option<u16>,

    #[arg(long, default_value = "https", global = true)]
    /// URL scheme used to reach the forge (http or https).
    pub scheme: String,

    #[arg(long, default_value = "", global = true)]
    /// Access token. Falls back to GITHUB_TOKEN, GITEA_TOKEN or GITLAB_TOKEN.
    pub token: String,

    #[arg(long, global = true)]
    /// JSON file of releases served by the local forge.
    pub fixture: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Releases requested per page. Overrides the config file.
    pub page_size: Option<u8>,

    #[arg(long, global = true)]
    /// Maximum pages fetched per range. Overrides the config file.
    pub max_pages: Option<u64>,

    #[arg(long, value_enum, global = true)]
    /// Order of releases within each group. Overrides the config file.
    pub direction: Option<SortDirection>,

    #[arg(long, global = true)]
    /// Path to a release-range.toml file.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Changelog subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Combine the release notes between two versions into one changelog.
    Compare(CompareArgs),

    /// List the versions selectable as range endpoints, as JSON.
    Releases {
        #[arg(long)]
        /// Repository as owner/name.
        repo: String,

        #[arg(long)]
        /// Write output to file instead of stdout.
        out_file: Option<String>,
    },
}

/// Arguments for the compare subcommand.
#[derive(clap::Args, Debug, Default)]
pub struct CompareArgs {
    #[arg(long)]
    /// Repository as owner/name.
    pub repo: Option<String>,

    #[arg(long)]
    /// Version the changes start after (excluded).
    pub from: Option<String>,

    #[arg(long)]
    /// Version the changes end at (included). Defaults to latest.
    pub to: Option<String>,

    #[arg(long)]
    /// Shareable link or query string (?repo=owner%2Fname&from=..&to=..).
    /// Explicit --repo, --from and --to take precedence.
    pub query: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    /// Output format.
    pub format: OutputFormat,

    #[arg(long)]
    /// Write output to file instead of stdout.
    pub out_file: Option<String>,
}

impl CompareArgs {
    /// Resolve the repository and range from flags and an optional query.
    pub fn resolve(&self) -> Result<(RepositoryRef, VersionRange)> {
        let query = self
            .query
            .as_deref()
            .map(RangeQuery::parse)
            .unwrap_or_default();

        let repository = match &self.repo {
            Some(repo) => RepositoryRef::from_slug(repo),
            None => query.repository,
        };

        validate_repository(&repository)?;

        let from = self.from.clone().or(query.from).ok_or_else(|| {
            ChangelogError::InvalidArgs(
                "a from version is required (--from or --query)".into(),
            )
        })?;

        let to = self
            .to
            .clone()
            .or(query.to)
            .unwrap_or_else(|| LATEST.to_string());

        Ok((repository, VersionRange::new(from, to)))
    }
}

/// Feeds need both an owner and a name to address a repository.
pub fn validate_repository(repo: &RepositoryRef) -> Result<()> {
    if repo.owner.is_empty() || repo.name.is_empty() {
        return Err(ChangelogError::InvalidArgs(format!(
            "repository must be given as owner/name, got \"{repo}\""
        )));
    }

    Ok(())
}

/// Pick the explicit token, else the environment value. Empty values count
/// as missing.
fn resolve_token(
    explicit: &str,
    env_value: Option<String>,
) -> Option<SecretString> {
    if !explicit.is_empty() {
        return Some(SecretString::from(explicit.to_string()));
    }

    env_value
        .filter(|t| !t.is_empty())
        .map(SecretString::from)
}

impl Args {
    /// Configure the release feed from CLI arguments.
    pub fn get_remote(&self) -> Result<Remote> {
        match self.forge {
            ForgeKind::Github => Ok(Remote::Github(self.remote_config())),
            ForgeKind::Gitea => Ok(Remote::Gitea(self.remote_config())),
            ForgeKind::Gitlab => Ok(Remote::Gitlab(self.remote_config())),
            ForgeKind::Local => {
                let fixture = self.fixture.clone().ok_or_else(|| {
                    ChangelogError::InvalidArgs(
                        "--fixture is required for the local forge".into(),
                    )
                })?;
                Ok(Remote::Local(fixture))
            }
        }
    }

    fn remote_config(&self) -> RemoteConfig {
        let env_token = self
            .forge
            .token_env_var()
            .and_then(|name| env::var(name).ok());

        RemoteConfig {
            host: self
                .host
                .clone()
                .unwrap_or_else(|| self.forge.default_host().to_string()),
            port: self.port,
            scheme: self.scheme.clone(),
            token: resolve_token(&self.token, env_token),
        }
    }

    /// Apply CLI overrides on top of file configuration.
    pub fn apply_overrides(&self, mut config: Config) -> Result<Config> {
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }

        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }

        if let Some(direction) = self.direction {
            config.direction = direction;
        }

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["release-range"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parses_compare_flags() {
        let args = parse(&[
            "compare",
            "--repo",
            "renovatebot/renovate",
            "--from",
            "v25.0.0",
            "--format",
            "json",
        ]);

        let Command::Compare(cmd) = args.command else {
            panic!("expected compare command");
        };

        assert_eq!(cmd.format, OutputFormat::Json);
        let (repo, range) = cmd.resolve().unwrap();
        assert_eq!(repo, RepositoryRef::new("renovatebot", "renovate"));
        assert_eq!(range, VersionRange::new("v25.0.0", "latest"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&[
            "releases",
            "--repo",
            "o/r",
            "--forge",
            "gitlab",
            "--page-size",
            "50",
            "--debug",
        ]);

        assert_eq!(args.forge, ForgeKind::Gitlab);
        assert_eq!(args.page_size, Some(50));
        assert!(args.debug);
    }

    #[test]
    fn test_resolve_from_query_with_flag_precedence() {
        let cmd = CompareArgs {
            query: Some("?repo=org%2Fname&from=v1.0.0&to=v2.0.0".into()),
            to: Some("v3.0.0".into()),
            ..CompareArgs::default()
        };

        let (repo, range) = cmd.resolve().unwrap();

        assert_eq!(repo, RepositoryRef::new("org", "name"));
        assert_eq!(range, VersionRange::new("v1.0.0", "v3.0.0"));
    }

    #[test]
    fn test_resolve_requires_repository_and_from() {
        let cmd = CompareArgs {
            repo: Some("justowner".into()),
            from: Some("v1.0.0".into()),
            ..CompareArgs::default()
        };
        assert!(matches!(cmd.resolve(), Err(ChangelogError::InvalidArgs(_))));

        let cmd = CompareArgs {
            repo: Some("o/r".into()),
            ..CompareArgs::default()
        };
        assert!(matches!(cmd.resolve(), Err(ChangelogError::InvalidArgs(_))));
    }

    #[test]
    fn test_resolve_token() {
        let token = resolve_token("flag", Some("env".into())).unwrap();
        assert_eq!(token.expose_secret(), "flag");

        let token = resolve_token("", Some("env".into())).unwrap();
        assert_eq!(token.expose_secret(), "env");

        assert!(resolve_token("", Some("".into())).is_none());
        assert!(resolve_token("", None).is_none());
    }

    #[test]
    fn test_get_remote_uses_forge_default_host() {
        let args = parse(&[
            "--forge", "gitea", "--token", "t", "releases", "--repo", "o/r",
        ]);

        let Remote::Gitea(config) = args.get_remote().unwrap() else {
            panic!("expected gitea remote");
        };

        assert_eq!(config.host, "gitea.com");
        assert_eq!(config.scheme, "https");
        assert!(config.token.is_some());
    }

    #[test]
    fn test_get_remote_with_custom_host() {
        let args = parse(&[
            "--host",
            "git.example.com",
            "--port",
            "8443",
            "releases",
            "--repo",
            "o/r",
        ]);

        let Remote::Github(config) = args.get_remote().unwrap() else {
            panic!("expected github remote");
        };

        assert_eq!(config.host, "git.example.com");
        assert_eq!(config.port, Some(8443));
    }

    #[test]
    fn test_local_forge_requires_fixture() {
        let args = parse(&["--forge", "local", "releases", "--repo", "o/r"]);
        assert!(matches!(
            args.get_remote(),
            Err(ChangelogError::InvalidArgs(_))
        ));

        let args = parse(&[
            "--forge",
            "local",
            "--fixture",
            "releases.json",
            "releases",
            "--repo",
            "o/r",
        ]);
        assert!(matches!(args.get_remote(), Ok(Remote::Local(_))));
    }

    #[test]
    fn test_apply_overrides() {
        let args = parse(&[
            "--max-pages",
            "5",
            "--direction",
            "asc",
            "releases",
            "--repo",
            "o/r",
        ]);

        let config = args.apply_overrides(Config::default()).unwrap();

        assert_eq!(config.max_pages, 5);
        assert_eq!(config.direction, SortDirection::Asc);
        assert_eq!(config.page_size, 30);
    }

    #[test]
    fn test_apply_overrides_validates() {
        let args = parse(&["--page-size", "0", "releases", "--repo", "o/r"]);
        assert!(matches!(
            args.apply_overrides(Config::default()),
            Err(ChangelogError::InvalidConfig(_))
        ));
    }
}
