//! Renders a comparison as markdown or JSON.
use serde::Serialize;
use std::fmt::Display;

use crate::{comparator::Comparison, error::Result};

/// Default markdown layout: one heading per group, one linked sub-heading
/// per contributing release, then that release's content verbatim.
pub const DEFAULT_TEMPLATE: &str = r#"# Changes from {{ from_label }} to {{ to_label }}
{% for group in document.groups %}
## {{ group.group | title }}
{% for entry in group.entries %}
### [{{ entry.tag }}]({{ entry.url }})

{{ entry.content }}
{% endfor %}{% endfor %}"#;

/// Output formats supported by the renderer.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => f.write_str("markdown"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Message shown in place of a document when the range holds no releases.
pub fn empty_range_message(comparison: &Comparison) -> String {
    format!(
        "No releases between {} and {} in {}",
        comparison.from_label, comparison.to_label, comparison.repository
    )
}

/// Render `comparison` with a Tera `template`.
pub fn render_markdown(comparison: &Comparison, template: &str) -> Result<String> {
    if comparison.is_empty() {
        return Ok(empty_range_message(comparison));
    }

    let mut tera = tera::Tera::default();
    tera.add_raw_template("changelog", template)?;

    let context = tera::Context::from_serialize(comparison)?;
    let rendered = tera.render("changelog", &context)?;

    Ok(rendered.trim_end().to_string())
}

/// Render `comparison` as pretty printed JSON.
pub fn render_json(comparison: &Comparison) -> Result<String> {
    Ok(serde_json::to_string_pretty(comparison)?)
}

pub fn render(
    comparison: &Comparison,
    format: OutputFormat,
    template: &str,
) -> Result<String> {
    match format {
        OutputFormat::Markdown => render_markdown(comparison, template),
        OutputFormat::Json => render_json(comparison),
    }
}
