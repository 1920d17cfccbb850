//! Gemtext backend.
//!
//! Line-oriented output for the Gemini protocol. Blocks are separated
//! by a blank line; inline links have no syntax here and arrive hoisted
//! as `=> href label` lines after the owning block.

use std::fmt::Write;

use slate_parser::CalloutKind;

use crate::backend::{RenderBackend, RenderedFootnote, RenderedList};
use crate::context::RenderContext;
use crate::inline::HoistedLink;
use crate::links::Format;

pub struct GemtextBackend;

impl RenderBackend for GemtextBackend {
    const FORMAT: Format = Format::Gemtext;
    const SEPARATOR: &'static str = "\n\n";
    const TRAILING_SEPARATOR: bool = false;

    fn document_header(ctx: &RenderContext, out: &mut Vec<String>) {
        if ctx.title.is_empty() {
            return;
        }
        out.push(format!("# {}", ctx.title));
        if !ctx.description.is_empty() {
            out.push(ctx.description.clone());
        }
        let datetime = ctx.datetime();
        if !datetime.is_empty() {
            out.push(datetime);
        }
    }

    fn heading(level: u8, text: &str, _id: &str, _ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(format!("{} {text}", "#".repeat(usize::from(level))));
    }

    fn paragraph(text: &str, _ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(text.to_owned());
    }

    fn code_block(language: Option<&str>, text: &str, _ctx: &RenderContext, out: &mut Vec<String>) {
        let mut block = format!("```{}\n", language.unwrap_or_default());
        block.push_str(text);
        block.push_str("```");
        out.push(block);
    }

    fn table(headers: &[String], rows: &[Vec<String>], _ctx: &RenderContext, out: &mut Vec<String>) {
        // No table syntax: one flattened line per row.
        let mut lines = vec![headers.join(" | ")];
        for row in rows {
            lines.push(row.join(" | "));
        }
        out.push(lines.join("\n"));
    }

    fn quote(
        kind: Option<CalloutKind>,
        children: &[String],
        _ctx: &RenderContext,
        out: &mut Vec<String>,
    ) {
        let mut lines = Vec::new();
        if let Some(kind) = kind {
            lines.push(format!("> {}:", kind.title()));
        }
        for segment in children {
            for line in segment.lines() {
                lines.push(format!("> {line}"));
            }
        }
        out.push(lines.join("\n"));
    }

    fn image(
        src: &str,
        alt: &str,
        caption: Option<&str>,
        _ctx: &RenderContext,
        out: &mut Vec<String>,
    ) {
        out.push(format!("=> {src} {alt}"));
        if let Some(caption) = caption {
            out.push(caption.to_owned());
        }
    }

    fn horizontal_rule(_ctx: &RenderContext, out: &mut Vec<String>) {
        out.push("---".to_owned());
    }

    fn list(list: &RenderedList, _ctx: &RenderContext, out: &mut Vec<String>) {
        let mut lines = Vec::new();
        push_list_lines(list, 0, &mut lines);
        out.push(lines.join("\n"));
    }

    fn links(links: &[HoistedLink], _ctx: &RenderContext, out: &mut Vec<String>) {
        for link in links {
            out.push(format!("=> {} {}", link.href, link.label));
        }
    }

    fn footnotes(notes: &[RenderedFootnote], _ctx: &RenderContext, out: &mut Vec<String>) {
        out.push("## Footnotes".to_owned());
        let mut lines = Vec::new();
        for note in notes {
            lines.push(format!("[{}] {}", note.index, note.body));
        }
        out.push(lines.join("\n"));
    }
}

fn push_list_lines(list: &RenderedList, depth: usize, lines: &mut Vec<String>) {
    let indent = " ".repeat(depth * 2);
    for (position, item) in list.items.iter().enumerate() {
        let mut line = indent.clone();
        if list.ordered {
            write!(line, "{}. ", position + 1).unwrap();
        } else {
            line.push_str("* ");
        }
        line.push_str(&item.text);
        lines.push(line);
        for block in &item.blocks {
            for block_line in block.lines() {
                lines.push(format!("{indent}  {block_line}"));
            }
        }
        if let Some(nested) = &item.nested {
            push_list_lines(nested, depth + 1, lines);
        }
    }
}
