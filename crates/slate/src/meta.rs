//! Build metadata embedded in generated HTML.
//!
//! `page` appends a trailing `<!-- slate: {json} -->` comment to HTML
//! output; `update` reads it back to recover the source file, template
//! and creation timestamps when the input argument is omitted.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!-- slate: (\{.*\}) -->").expect("valid regex"));

/// How much of the document tail is scanned for the comment.
const TAIL_BYTES: usize = 1024;

/// Provenance of a generated HTML document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct BuildMetadata {
    pub source: String,
    pub template: String,
    pub creation_date: String,
    pub creation_time: String,
}

impl BuildMetadata {
    /// Render the trailing HTML comment carrying this metadata.
    pub(crate) fn comment(&self) -> Result<String, serde_json::Error> {
        Ok(format!("<!-- slate: {} -->", serde_json::to_string(self)?))
    }

    /// Recover metadata from the tail of a generated HTML document.
    ///
    /// Returns `None` when the comment is absent or its payload does
    /// not parse.
    pub(crate) fn from_document(text: &str) -> Option<Self> {
        // The comment is always appended last, so only the tail matters.
        let mut start = text.len().saturating_sub(TAIL_BYTES);
        while !text.is_char_boundary(start) {
            start += 1;
        }
        let captures = COMMENT_RE.captures(&text[start..])?;
        serde_json::from_str(&captures[1]).ok()
    }
}
