//! Error taxonomy for range resolution, fetching, and configuration.

use thiserror::Error;

/// Main error type for release-range operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Range errors
    #[error("Invalid Version: {tag}")]
    InvalidVersion { tag: String },

    #[error(
        "Unable to resolve range {from}..{to}: endpoints not found within {pages} page(s)"
    )]
    RangeUnresolved {
        from: String,
        to: String,
        pages: u64,
    },

    // Network/API errors
    #[error("Failed to fetch releases: {0}")]
    FetchFailure(String),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using ChangelogError
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create an invalid version error for the offending tag
    pub fn invalid_version(tag: impl Into<String>) -> Self {
        Self::InvalidVersion { tag: tag.into() }
    }

    /// Create a fetch failure with context
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::FetchFailure(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for ChangelogError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Every transport error is a fetch failure; status details stay in the message
impl From<reqwest::Error> for ChangelogError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::FetchFailure(format!("status {status}: {err}"))
        } else {
            Self::FetchFailure(err.to_string())
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ChangelogError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidConfig(format!("Invalid header value: {}", err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for ChangelogError {
    fn from(err: octocrab::Error) -> Self {
        Self::FetchFailure(format!("GitHub API error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = ChangelogError::invalid_version("1");
        assert_eq!(err.to_string(), "Invalid Version: 1");

        let err = ChangelogError::fetch("connection reset");
        assert_eq!(
            err.to_string(),
            "Failed to fetch releases: connection reset"
        );

        let err = ChangelogError::RangeUnresolved {
            from: "v1.0.0".into(),
            to: "latest".into(),
            pages: 3,
        };
        assert_eq!(
            err.to_string(),
            "Unable to resolve range v1.0.0..latest: endpoints not found within 3 page(s)"
        );
    }

    #[test]
    fn test_error_helpers() {
        let err = ChangelogError::invalid_version("nope");
        assert!(
            matches!(err, ChangelogError::InvalidVersion { ref tag } if tag == "nope")
        );

        let err = ChangelogError::invalid_config("page_size must be > 0");
        assert!(matches!(err, ChangelogError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("{");
        let err: ChangelogError = json_err.unwrap_err().into();
        assert!(matches!(err, ChangelogError::JsonParseError(_)));

        let url_err = url::Url::parse("not a url");
        let err: ChangelogError = url_err.unwrap_err().into();
        assert!(matches!(err, ChangelogError::UrlError(_)));
    }
}
