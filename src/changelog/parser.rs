//! Splits a release body into heading-delimited sections.
//!
//! The first heading in a body fixes the section level. Every later heading
//! at that level or higher opens a new section; deeper headings stay inside
//! the current section's content. Anything before the first heading is
//! dropped, so a body without headings yields no sections.
use log::*;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// Title returned when a heading has no usable text.
pub const UNKNOWN_TITLE: &str = "unknown";

/// Immediate child of a heading. Only text-like children carry a value;
/// containers such as emphasis or links hold their text further down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineNode {
    pub value: Option<String>,
}

/// A heading as found in a release body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    pub level: u8,
    pub children: Vec<InlineNode>,
}

/// Markdown source of one section's content, re-emitted verbatim.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MarkdownBlock(pub String);

impl MarkdownBlock {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// One heading plus the content that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<C = MarkdownBlock> {
    pub title: String,
    pub content: C,
}

/// Title of a heading: the value of its first child, or [`UNKNOWN_TITLE`]
/// when it has no children or the first child has no text value.
pub fn section_title(node: &HeadingNode) -> String {
    node.children
        .first()
        .and_then(|c| c.value.clone())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Heading found while scanning, with the byte span it occupies.
struct HeadingExtract {
    node: HeadingNode,
    start_byte: usize,
    end_byte: usize,
}

/// Heading being collected, with the nesting depth of inline containers
/// opened inside it.
struct HeadingBuilder {
    level: u8,
    children: Vec<InlineNode>,
    start_byte: usize,
    depth: usize,
}

impl HeadingBuilder {
    fn push_text(&mut self, text: &str) {
        // adjacent text events form one text node
        match self.children.last_mut() {
            Some(InlineNode { value: Some(value) }) => value.push_str(text),
            _ => self.children.push(InlineNode {
                value: Some(text.to_string()),
            }),
        }
    }
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Collect top-level headings. Headings nested in block quotes or list
/// items belong to the surrounding content.
fn extract_headings(body: &str) -> Vec<HeadingExtract> {
    let parser = Parser::new_ext(body, markdown_options());

    let mut headings = vec![];
    let mut block_depth: usize = 0;
    let mut current: Option<HeadingBuilder> = None;

    for (event, range) in parser.into_offset_iter() {
        if let Some(builder) = current.as_mut() {
            let mut finished = false;
            match event {
                Event::End(TagEnd::Heading(_)) if builder.depth == 0 => {
                    finished = true;
                }
                Event::Start(_) => {
                    if builder.depth == 0 {
                        builder.children.push(InlineNode { value: None });
                    }
                    builder.depth += 1;
                }
                Event::End(_) => {
                    builder.depth = builder.depth.saturating_sub(1);
                }
                Event::Text(text) | Event::Code(text) if builder.depth == 0 => {
                    builder.push_text(&text);
                }
                Event::InlineHtml(_) | Event::Html(_) if builder.depth == 0 => {
                    builder.children.push(InlineNode { value: None });
                }
                _ => {}
            }

            if finished && let Some(builder) = current.take() {
                headings.push(HeadingExtract {
                    node: HeadingNode {
                        level: builder.level,
                        children: builder.children,
                    },
                    start_byte: builder.start_byte,
                    end_byte: range.end,
                });
            }
            continue;
        }

        match event {
            Event::Start(Tag::Heading { level, .. }) if block_depth == 0 => {
                current = Some(HeadingBuilder {
                    level: heading_level_to_u8(level),
                    children: vec![],
                    start_byte: range.start,
                    depth: 0,
                });
            }
            Event::Start(_) => block_depth += 1,
            Event::End(_) => block_depth = block_depth.saturating_sub(1),
            _ => {}
        }
    }

    headings
}

/// Parse a release body into ordered sections.
pub fn parse_sections(body: &str) -> Vec<Section> {
    let headings = extract_headings(body);

    let Some(first) = headings.first() else {
        if !body.trim().is_empty() {
            debug!("release body has no headings: content dropped");
        }
        return vec![];
    };

    let mut section_level = first.node.level;
    let mut openers: Vec<&HeadingExtract> = vec![];

    for heading in headings.iter() {
        if heading.node.level <= section_level {
            section_level = heading.node.level;
            openers.push(heading);
        }
    }

    openers
        .iter()
        .enumerate()
        .map(|(idx, heading)| {
            let content_end = openers
                .get(idx + 1)
                .map(|next| next.start_byte)
                .unwrap_or(body.len());
            let content = body[heading.end_byte..content_end].trim();

            Section {
                title: section_title(&heading.node),
                content: MarkdownBlock(content.to_string()),
            }
        })
        .collect()
}
