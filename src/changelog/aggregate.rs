//! Merges per-release sections into one category-major document.
use log::*;
use serde::{Serialize, ser::SerializeStruct};
use std::{collections::HashMap, sync::Arc};

use crate::{
    changelog::{
        category::{Category, classify, compare_groups_by_priority},
        parser::{MarkdownBlock, Section, parse_sections},
    },
    forge::types::Release,
};

/// One release's contribution to a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<C = MarkdownBlock> {
    /// Release the section came from.
    pub release: Arc<Release>,
    /// Section title as written in the release body.
    pub title: String,
    pub content: C,
}

impl<C: Serialize> Serialize for Entry<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Entry", 6)?;
        state.serialize_field("tag", &self.release.tag)?;
        state.serialize_field("name", &self.release.display_name)?;
        state.serialize_field("url", &self.release.html_url)?;
        state.serialize_field("published_at", &self.release.published_at)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("content", &self.content)?;
        state.end()
    }
}

/// A canonical group and its entries, newest release first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntries<C = MarkdownBlock> {
    pub group: Category,
    pub entries: Vec<Entry<C>>,
}

/// Cross-release changelog, groups in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedDocument<C = MarkdownBlock> {
    pub groups: Vec<GroupEntries<C>>,
}

impl<C> Default for CombinedDocument<C> {
    fn default() -> Self {
        Self { groups: vec![] }
    }
}

impl<C> CombinedDocument<C> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, category: &Category) -> Option<&GroupEntries<C>> {
        self.groups.iter().find(|g| &g.group == category)
    }
}

/// Aggregate releases with the markdown section parser.
pub fn aggregate(releases: &[Release]) -> CombinedDocument {
    aggregate_with(releases, parse_sections)
}

/// Aggregate releases, splitting each body with `parse`.
///
/// Releases are visited in the given order and sections in body order, so
/// each group's entries keep that order. Groups are then stably sorted by
/// priority; groups of equal rank stay in first-seen order. Releases without
/// sections contribute nothing.
pub fn aggregate_with<C, F>(releases: &[Release], parse: F) -> CombinedDocument<C>
where
    F: Fn(&str) -> Vec<Section<C>>,
{
    let mut groups: Vec<GroupEntries<C>> = vec![];
    let mut index: HashMap<Category, usize> = HashMap::new();

    for release in releases {
        let sections = parse(&release.body_markdown);

        if sections.is_empty() {
            debug!("release {} contributes no sections", release.tag);
            continue;
        }

        let release = Arc::new(release.clone());

        for section in sections {
            let group = classify(&section.title);

            debug!(
                "release {}: section \"{}\" -> {group}",
                release.tag, section.title
            );

            let position = *index.entry(group.clone()).or_insert_with(|| {
                groups.push(GroupEntries {
                    group,
                    entries: vec![],
                });
                groups.len() - 1
            });

            groups[position].entries.push(Entry {
                release: Arc::clone(&release),
                title: section.title,
                content: section.content,
            });
        }
    }

    groups.sort_by(|a, b| compare_groups_by_priority(&a.group, &b.group));

    CombinedDocument { groups }
}
