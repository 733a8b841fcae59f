use serde::Serialize;
use std::{cmp::Ordering, fmt::Display};

/// Changelog category a release section is filed under. Sections whose
/// title matches no rule keep their normalized title as a passthrough group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Breaking,
    Features,
    BugFixes,
    Reverts,
    Thanks,
    Artifacts,
    Credits,
    Chore,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Breaking => "breaking changes",
            Category::Features => "features",
            Category::BugFixes => "bug fixes",
            Category::Reverts => "reverts",
            Category::Thanks => "thanks",
            Category::Artifacts => "artifacts",
            Category::Credits => "credits",
            Category::Chore => "chore",
            Category::Other(name) => name,
        }
    }

    /// Map a group name back to its category. Unknown names become
    /// passthrough groups.
    pub fn from_name(name: &str) -> Self {
        match name {
            "breaking changes" => Category::Breaking,
            "features" => Category::Features,
            "bug fixes" => Category::BugFixes,
            "reverts" => Category::Reverts,
            "thanks" => Category::Thanks,
            "artifacts" => Category::Artifacts,
            "credits" => Category::Credits,
            "chore" => Category::Chore,
            other => Category::Other(other.to_string()),
        }
    }

    fn is_documentation(&self) -> bool {
        matches!(self, Category::Other(name) if name.contains("doc"))
    }

    /// Priority rank, lowest first. Every unrecognized group shares one rank
    /// just above `chore`; documentation-like groups sit after reverts.
    pub fn rank(&self) -> u8 {
        match self {
            Category::Breaking => 0,
            Category::Features => 1,
            Category::BugFixes => 2,
            Category::Reverts => 3,
            Category::Other(_) if self.is_documentation() => 4,
            Category::Other(_) => 5,
            Category::Chore => 6,
            Category::Credits => 7,
            Category::Thanks => 8,
            Category::Artifacts => 9,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Order two groups by priority. Groups of equal rank compare equal, so a
/// stable sort keeps their existing relative order.
pub fn compare_groups_by_priority(a: &Category, b: &Category) -> Ordering {
    a.rank().cmp(&b.rank())
}

type TitlePredicate = fn(&str) -> bool;

fn contains_any(title: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| title.contains(k))
}

/// Ordered keyword rules, first match wins. "feature" is tried before the
/// semver-level words so "Major Features" files under features.
const RULES: &[(TitlePredicate, fn() -> Category)] = &[
    (|t: &str| contains_any(t, &["break"]), || Category::Breaking),
    (|t: &str| contains_any(t, &["feature"]), || Category::Features),
    (|t: &str| contains_any(t, &["major"]), || Category::Breaking),
    (|t: &str| contains_any(t, &["minor"]), || Category::Features),
    (
        |t: &str| contains_any(t, &["bug", "fix", "patch"]),
        || Category::BugFixes,
    ),
    (|t: &str| contains_any(t, &["revert"]), || Category::Reverts),
    (|t: &str| contains_any(t, &["thank"]), || Category::Thanks),
    (|t: &str| contains_any(t, &["artifact"]), || Category::Artifacts),
    (|t: &str| contains_any(t, &["credit"]), || Category::Credits),
    (|t: &str| contains_any(t, &["chore"]), || Category::Chore),
];

/// Lower-case a title and strip surrounding whitespace and punctuation,
/// including any trailing colon.
pub fn normalize_title(title: &str) -> String {
    title
        .trim()
        .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_lowercase()
}

/// File a section title under a category. Never fails.
pub fn classify(title: &str) -> Category {
    let normalized = normalize_title(title);

    RULES
        .iter()
        .find(|(matches, _)| matches(&normalized))
        .map(|(_, category)| category())
        .unwrap_or(Category::Other(normalized))
}
