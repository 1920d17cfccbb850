//! Output formats and link target resolution.

use std::sync::LazyLock;

use regex::Regex;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").unwrap());

/// The three output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Html,
    Gemtext,
    Gopher,
}

impl Format {
    /// Sibling page extension local `.md` links are rewritten to.
    #[must_use]
    pub fn page_extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Gemtext => "gmi",
            Self::Gopher => "txt",
        }
    }

    /// Parse a user-facing format name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "html" => Some(Self::Html),
            "gemini" | "gemtext" => Some(Self::Gemtext),
            "gopher" => Some(Self::Gopher),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Gemtext => "gemini",
            Self::Gopher => "gopher",
        }
    }
}

/// Rewrite a link target for the given output format.
///
/// Pure function over the href text; the filesystem is never consulted.
/// Scheme-bearing URLs (`https://...`, `mailto:...`), protocol-relative
/// `//` URLs and `#anchor` links pass through unchanged. Local `.md`
/// targets are rewritten to the format's sibling extension, keeping any
/// `#fragment`. Everything else passes through.
#[must_use]
pub fn resolve(href: &str, format: Format) -> String {
    if href.starts_with('#') || href.starts_with("//") || SCHEME_RE.is_match(href) {
        return href.to_owned();
    }

    let (path, fragment) = match href.find('#') {
        Some(pos) => (&href[..pos], &href[pos..]),
        None => (href, ""),
    };

    if path.len() >= 3 && path[path.len() - 3..].eq_ignore_ascii_case(".md") {
        format!(
            "{}.{}{fragment}",
            &path[..path.len() - 3],
            format.page_extension()
        )
    } else {
        href.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_md_rewritten_per_format() {
        assert_eq!(resolve("notes.md", Format::Html), "notes.html");
        assert_eq!(resolve("notes.md", Format::Gemtext), "notes.gmi");
        assert_eq!(resolve("notes.md", Format::Gopher), "notes.txt");
    }

    #[test]
    fn test_md_uppercase_extension() {
        assert_eq!(resolve("NOTES.MD", Format::Html), "NOTES.html");
    }

    #[test]
    fn test_fragment_preserved() {
        assert_eq!(resolve("page.md#usage", Format::Gemtext), "page.gmi#usage");
    }

    #[test]
    fn test_scheme_urls_unchanged() {
        for format in [Format::Html, Format::Gemtext, Format::Gopher] {
            assert_eq!(
                resolve("https://example.com/a.md", format),
                "https://example.com/a.md"
            );
            assert_eq!(resolve("mailto:me@example.com", format), "mailto:me@example.com");
            assert_eq!(resolve("gemini://example.com", format), "gemini://example.com");
        }
    }

    #[test]
    fn test_protocol_relative_unchanged() {
        assert_eq!(resolve("//cdn.example.com/x.md", Format::Html), "//cdn.example.com/x.md");
    }

    #[test]
    fn test_anchor_unchanged() {
        assert_eq!(resolve("#section", Format::Gopher), "#section");
    }

    #[test]
    fn test_non_md_unchanged() {
        assert_eq!(resolve("image.png", Format::Html), "image.png");
        assert_eq!(resolve("./doc.txt", Format::Gemtext), "./doc.txt");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(Format::from_name("HTML"), Some(Format::Html));
        assert_eq!(Format::from_name("gemtext"), Some(Format::Gemtext));
        assert_eq!(Format::from_name("gemini"), Some(Format::Gemtext));
        assert_eq!(Format::from_name("gopher"), Some(Format::Gopher));
        assert_eq!(Format::from_name("pdf"), None);
    }
}
