//! Lenient parsing of range requests given as a URL or query string.
//!
//! `?repo=owner%2Fname&from=v1.0.0&to=latest` describes a comparison.
//! Unknown parameters are ignored and a malformed repository degrades to
//! empty parts; only the version endpoints are checked strictly, later, by
//! the range filter.
use url::{Url, form_urlencoded};

use crate::{
    error::{ChangelogError, Result},
    forge::types::RepositoryRef,
    range::VersionRange,
    version::LATEST,
};

/// A comparison request as carried in a shareable link.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    pub repository: RepositoryRef,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RangeQuery {
    /// Parse a full URL or a bare query string, with or without leading `?`.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        let query = match Url::parse(input) {
            Ok(url) => url.query().unwrap_or_default().to_string(),
            Err(_) => input.trim_start_matches('?').to_string(),
        };

        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim().to_string();
            match key.as_ref() {
                "repo" => parsed.repository = RepositoryRef::from_slug(&value),
                "from" if !value.is_empty() => parsed.from = Some(value),
                "to" if !value.is_empty() => parsed.to = Some(value),
                _ => {}
            }
        }

        parsed
    }

    /// The requested range. `to` defaults to the latest release.
    pub fn range(&self) -> Result<VersionRange> {
        let from = self.from.clone().ok_or_else(|| {
            ChangelogError::InvalidArgs("query is missing \"from\"".into())
        })?;

        let to = self.to.clone().unwrap_or_else(|| LATEST.to_string());

        Ok(VersionRange::new(from, to))
    }

    /// Serialize back to a query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if !self.repository.is_empty() {
            serializer.append_pair("repo", &self.repository.slug());
        }
        if let Some(from) = &self.from {
            serializer.append_pair("from", from);
        }
        if let Some(to) = &self.to {
            serializer.append_pair("to", to);
        }

        serializer.finish()
    }
}
