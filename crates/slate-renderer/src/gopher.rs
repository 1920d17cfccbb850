//! Gophermap backend.
//!
//! Every text line becomes an informational menu line
//! (`i<text>\t\t<host>\t<port>`). Hoisted links become typed menu
//! entries: `h` with a `URL:` selector for external targets, `0` for
//! local text documents. Lines are joined with CRLF and the map ends
//! with a trailing CRLF.

use std::fmt::Write;

use slate_parser::CalloutKind;

use crate::backend::{RenderBackend, RenderedFootnote, RenderedList};
use crate::context::RenderContext;
use crate::inline::HoistedLink;
use crate::links::Format;

pub struct GopherBackend;

/// One informational line. Tabs would break the menu structure, so
/// they are replaced with spaces.
fn info(text: &str, ctx: &RenderContext) -> String {
    format!("i{}\t\t{}\t{}", text.replace('\t', " "), ctx.host, ctx.port)
}

impl RenderBackend for GopherBackend {
    const FORMAT: Format = Format::Gopher;
    const SEPARATOR: &'static str = "\r\n";
    const TRAILING_SEPARATOR: bool = true;

    fn document_header(ctx: &RenderContext, out: &mut Vec<String>) {
        if ctx.title.is_empty() {
            return;
        }
        out.push(info(&ctx.title, ctx));
        if !ctx.description.is_empty() {
            out.push(info(&ctx.description, ctx));
        }
        let datetime = ctx.datetime();
        if !datetime.is_empty() {
            out.push(info(&datetime, ctx));
        }
    }

    fn heading(level: u8, text: &str, _id: &str, ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(info(&format!("{} {text}", "#".repeat(usize::from(level))), ctx));
    }

    fn paragraph(text: &str, ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(info(text, ctx));
    }

    fn code_block(_language: Option<&str>, text: &str, ctx: &RenderContext, out: &mut Vec<String>) {
        for line in text.lines() {
            out.push(info(line, ctx));
        }
    }

    fn table(headers: &[String], rows: &[Vec<String>], ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(info(&headers.join(" | "), ctx));
        for row in rows {
            out.push(info(&row.join(" | "), ctx));
        }
    }

    fn quote(
        kind: Option<CalloutKind>,
        children: &[String],
        ctx: &RenderContext,
        out: &mut Vec<String>,
    ) {
        // Children are already menu lines; quoting flattens to text.
        if let Some(kind) = kind {
            out.push(info(&format!("{}:", kind.title()), ctx));
        }
        out.extend(children.iter().cloned());
    }

    fn image(
        src: &str,
        alt: &str,
        _caption: Option<&str>,
        ctx: &RenderContext,
        out: &mut Vec<String>,
    ) {
        Self::links(
            &[HoistedLink {
                label: alt.to_owned(),
                href: src.to_owned(),
            }],
            ctx,
            out,
        );
    }

    fn horizontal_rule(ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(info("---", ctx));
    }

    fn list(list: &RenderedList, ctx: &RenderContext, out: &mut Vec<String>) {
        push_list_lines(list, 0, ctx, out);
    }

    fn links(links: &[HoistedLink], ctx: &RenderContext, out: &mut Vec<String>) {
        for link in links {
            let label = link.label.replace('\t', " ");
            let mut line = String::new();
            if link.href.contains("://") {
                write!(line, "h{label}\tURL:{}", link.href).unwrap();
            } else {
                write!(line, "0{label}\t{}", link.href).unwrap();
            }
            write!(line, "\t{}\t{}", ctx.host, ctx.port).unwrap();
            out.push(line);
        }
    }

    fn footnotes(notes: &[RenderedFootnote], ctx: &RenderContext, out: &mut Vec<String>) {
        for note in notes {
            out.push(info(&format!("[{}] {}", note.index, note.body), ctx));
        }
    }
}

fn push_list_lines(list: &RenderedList, depth: usize, ctx: &RenderContext, out: &mut Vec<String>) {
    let indent = " ".repeat(depth * 2);
    for (position, item) in list.items.iter().enumerate() {
        let line = if list.ordered {
            format!("{indent}{}. {}", position + 1, item.text)
        } else {
            format!("{indent}- {}", item.text)
        };
        out.push(info(&line, ctx));
        out.extend(item.blocks.iter().cloned());
        if let Some(nested) = &item.nested {
            push_list_lines(nested, depth + 1, ctx, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RenderedItem;
    use pretty_assertions::assert_eq;

    fn ctx() -> RenderContext {
        RenderContext {
            host: "gopher.example".to_owned(),
            port: 70,
            ..RenderContext::default()
        }
    }

    #[test]
    fn test_info_line_shape() {
        assert_eq!(info("hello", &ctx()), "ihello\t\tgopher.example\t70");
    }

    #[test]
    fn test_tabs_replaced_in_text() {
        assert_eq!(info("a\tb", &ctx()), "ia b\t\tgopher.example\t70");
    }

    #[test]
    fn test_external_link_menu_entry() {
        let mut out = Vec::new();
        GopherBackend::links(
            &[HoistedLink {
                label: "site".to_owned(),
                href: "https://example.com".to_owned(),
            }],
            &ctx(),
            &mut out,
        );
        assert_eq!(out, vec!["hsite\tURL:https://example.com\tgopher.example\t70".to_owned()]);
    }

    #[test]
    fn test_local_link_menu_entry() {
        let mut out = Vec::new();
        GopherBackend::links(
            &[HoistedLink {
                label: "notes".to_owned(),
                href: "notes.txt".to_owned(),
            }],
            &ctx(),
            &mut out,
        );
        assert_eq!(out, vec!["0notes\tnotes.txt\tgopher.example\t70".to_owned()]);
    }

    #[test]
    fn test_code_block_line_per_line() {
        let mut out = Vec::new();
        GopherBackend::code_block(Some("rust"), "a\nb\n", &ctx(), &mut out);
        assert_eq!(
            out,
            vec![
                "ia\t\tgopher.example\t70".to_owned(),
                "ib\t\tgopher.example\t70".to_owned()
            ]
        );
    }

    #[test]
    fn test_list_markers() {
        let list = RenderedList {
            ordered: true,
            items: vec![
                RenderedItem {
                    text: "first".to_owned(),
                    blocks: Vec::new(),
                    nested: None,
                },
                RenderedItem {
                    text: "second".to_owned(),
                    blocks: Vec::new(),
                    nested: None,
                },
            ],
        };
        let mut out = Vec::new();
        GopherBackend::list(&list, &ctx(), &mut out);
        assert_eq!(
            out,
            vec![
                "i1. first\t\tgopher.example\t70".to_owned(),
                "i2. second\t\tgopher.example\t70".to_owned()
            ]
        );
    }

    #[test]
    fn test_document_header() {
        let mut context = ctx();
        context.title = "Home".to_owned();
        let mut out = Vec::new();
        GopherBackend::document_header(&context, &mut out);
        assert_eq!(out, vec!["iHome\t\tgopher.example\t70".to_owned()]);
    }
}
