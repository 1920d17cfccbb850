//! YAML frontmatter support.
//!
//! Pages may open with a `---` fenced YAML block carrying metadata:
//!
//! ```text
//! ---
//! title: My Post
//! description: A great post
//! template: blog.html
//! category: blog
//! type: blog
//! date: 2024-12-01
//! author: Author Name
//! ---
//! ```
//!
//! [`extract`] splits the metadata from the markdown body; a document
//! without frontmatter yields defaults and the untouched text.

use serde::{Deserialize, Serialize};

/// Metadata recognized in a page's frontmatter block.
///
/// All fields are optional; `None` means the field was not set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Template file the page is rendered into (HTML output only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Page type: `blog` or `page`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,

    /// Publication date, ISO format (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Frontmatter {
    /// Check if no field was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate field combinations.
    ///
    /// Returns human-readable problems, one per finding; an empty list
    /// means the metadata is valid. `file_path` prefixes each message.
    #[must_use]
    pub fn validate(&self, file_path: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if self.page_type.as_deref() == Some("blog") {
            match &self.date {
                None => errors.push(format!("{file_path}: Blog posts require 'date' field")),
                Some(date) if !is_iso_date(date) => errors.push(format!(
                    "{file_path}: 'date' must be in ISO format (YYYY-MM-DD), got: {date}"
                )),
                Some(_) => {}
            }
            if self.title.is_none() {
                errors.push(format!("{file_path}: Blog posts require 'title' field"));
            }
        }

        if let Some(page_type) = &self.page_type {
            if page_type != "blog" && page_type != "page" {
                errors.push(format!(
                    "{file_path}: 'type' must be one of [\"blog\", \"page\"], got: {page_type}"
                ));
            }
        }

        errors
    }
}

/// Error type for frontmatter operations.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// YAML parsing error.
    #[error("invalid frontmatter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split frontmatter from a markdown document.
///
/// Returns the parsed metadata and the remaining body. A document
/// without a leading `---` fence (or with an unterminated one) yields
/// defaults and the original text unchanged.
///
/// # Errors
///
/// Returns an error if the fenced block is not valid YAML.
pub fn extract(text: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let Some(after_open) = opening_fence(text) else {
        return Ok((Frontmatter::default(), text));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            let meta = if yaml.trim().is_empty() {
                Frontmatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((meta, body));
        }
        offset += line.len();
    }

    // Unterminated fence: the whole document is body.
    Ok((Frontmatter::default(), text))
}

/// Content following a `---` opening fence on the first line.
fn opening_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("---")?;
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.strip_prefix('\n')
}

fn is_iso_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit())
}
