//! Table-of-contents generation for the `{{toc}}` variable.

use std::fmt::Write;

use slate_parser::Block;

use crate::escape::escape_html;

/// Build a nested `<ul class="content-toc">` from the document's
/// headings, anchored on their slug ids. Returns an empty string for a
/// document without headings.
#[must_use]
pub fn toc_html(blocks: &[Block]) -> String {
    let headings: Vec<(u8, &str, &str)> = blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading { level, text, id } => Some((*level, text.as_str(), id.as_str())),
            _ => None,
        })
        .collect();
    let Some(&(base, _, _)) = headings.first() else {
        return String::new();
    };

    let mut out = String::from(r#"<ul class="content-toc">"#);
    let mut prev = base;
    for (position, &(level, text, id)) in headings.iter().enumerate() {
        // Levels shallower than the first heading are clamped to it.
        let level = level.max(base);
        if position > 0 {
            if level > prev {
                for _ in prev..level {
                    out.push_str("<ul>");
                }
            } else {
                out.push_str("</li>");
                for _ in level..prev {
                    out.push_str("</ul></li>");
                }
            }
        }
        write!(
            out,
            r##"<li><a href="#{}">{}</a>"##,
            escape_html(id),
            escape_html(text)
        )
        .unwrap();
        prev = level;
    }
    out.push_str("</li>");
    for _ in base..prev {
        out.push_str("</ul></li>");
    }
    out.push_str("</ul>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slate_parser::parse;

    #[test]
    fn test_empty_without_headings() {
        assert_eq!(toc_html(&parse("just a paragraph").blocks), "");
    }

    #[test]
    fn test_flat_headings() {
        let doc = parse("## One\n\n## Two");
        assert_eq!(
            toc_html(&doc.blocks),
            r##"<ul class="content-toc"><li><a href="#one">One</a></li><li><a href="#two">Two</a></li></ul>"##
        );
    }

    #[test]
    fn test_nested_headings() {
        let doc = parse("## Top\n\n### Inner\n\n## Next");
        assert_eq!(
            toc_html(&doc.blocks),
            r##"<ul class="content-toc"><li><a href="#top">Top</a><ul><li><a href="#inner">Inner</a></li></ul></li><li><a href="#next">Next</a></li></ul>"##
        );
    }

    #[test]
    fn test_trailing_deep_heading_closed() {
        let doc = parse("# A\n\n## B");
        assert_eq!(
            toc_html(&doc.blocks),
            r##"<ul class="content-toc"><li><a href="#a">A</a><ul><li><a href="#b">B</a></li></ul></li></ul>"##
        );
    }

    #[test]
    fn test_shallower_than_first_clamped() {
        let doc = parse("## Deep\n\n# Shallow");
        assert_eq!(
            toc_html(&doc.blocks),
            r##"<ul class="content-toc"><li><a href="#deep">Deep</a></li><li><a href="#shallow">Shallow</a></li></ul>"##
        );
    }

    #[test]
    fn test_duplicate_headings_use_disambiguated_ids() {
        let doc = parse("## FAQ\n\n## FAQ");
        let toc = toc_html(&doc.blocks);
        assert!(toc.contains(r##"href="#faq""##));
        assert!(toc.contains(r##"href="#faq-1""##));
    }
}
