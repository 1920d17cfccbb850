//! HTML backend.
//!
//! Semantic tags with deterministic `content-<kind>` class names, the
//! shape the stock stylesheets target. One output segment per block,
//! joined with newlines.

use std::fmt::Write;

use slate_parser::CalloutKind;

use crate::backend::{RenderBackend, RenderedFootnote, RenderedList};
use crate::context::RenderContext;
use crate::escape::escape_html;
use crate::inline::HoistedLink;
use crate::links::Format;

pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    const FORMAT: Format = Format::Html;
    const SEPARATOR: &'static str = "\n";
    const TRAILING_SEPARATOR: bool = false;

    fn document_header(_ctx: &RenderContext, _out: &mut Vec<String>) {
        // Title and description come from the page template.
    }

    fn heading(level: u8, text: &str, id: &str, _ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(format!(
            "<h{level} class='content-h{level}' id='{}'>{}</h{level}>",
            escape_html(id),
            escape_html(text)
        ));
    }

    fn paragraph(text: &str, _ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(format!("<p class='content-paragraph'>{text}</p>"));
    }

    fn code_block(language: Option<&str>, text: &str, _ctx: &RenderContext, out: &mut Vec<String>) {
        let language = language.unwrap_or("plaintext");
        out.push(format!(
            "<pre class='content-code'><code class=\"language-{}\">{}</code></pre>",
            escape_html(language),
            escape_html(text)
        ));
    }

    fn table(headers: &[String], rows: &[Vec<String>], _ctx: &RenderContext, out: &mut Vec<String>) {
        let mut html = String::from("<table class='content-table'><thead><tr>");
        for header in headers {
            write!(html, "<th>{header}</th>").unwrap();
        }
        html.push_str("</tr></thead><tbody>");
        for row in rows {
            html.push_str("<tr>");
            for cell in row {
                write!(html, "<td>{cell}</td>").unwrap();
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        out.push(html);
    }

    fn quote(
        kind: Option<CalloutKind>,
        children: &[String],
        _ctx: &RenderContext,
        out: &mut Vec<String>,
    ) {
        let inner = children.join("\n");
        match kind {
            Some(kind) => out.push(format!(
                "<div class=\"content-callout callout callout-{}\"><strong>{}</strong> {inner}</div>",
                kind.name(),
                kind.title()
            )),
            None => out.push(format!(
                "<blockquote class='content-blockquote'>{inner}</blockquote>"
            )),
        }
    }

    fn image(
        src: &str,
        alt: &str,
        caption: Option<&str>,
        _ctx: &RenderContext,
        out: &mut Vec<String>,
    ) {
        let mut figure = format!(
            "<figure class=\"content-figure\"><img src=\"{}\" alt=\"{}\" class=\"content-image\"/>",
            escape_html(src),
            escape_html(alt)
        );
        if let Some(caption) = caption {
            write!(
                figure,
                "<figcaption class='caption'>{}</figcaption>",
                escape_html(caption)
            )
            .unwrap();
        }
        figure.push_str("</figure>");
        out.push(figure);
    }

    fn horizontal_rule(_ctx: &RenderContext, out: &mut Vec<String>) {
        out.push("<hr class='content-hr'/>".to_owned());
    }

    fn list(list: &RenderedList, _ctx: &RenderContext, out: &mut Vec<String>) {
        out.push(render_list(list));
    }

    fn links(_links: &[HoistedLink], _ctx: &RenderContext, _out: &mut Vec<String>) {
        // Links are inlined at their origin.
    }

    fn footnotes(notes: &[RenderedFootnote], _ctx: &RenderContext, out: &mut Vec<String>) {
        let mut html = String::from("<section class='content-footnotes'><hr class='content-hr'/><ol>");
        for note in notes {
            write!(html, "<li id='fn-{}'>{}</li>", escape_html(&note.label), note.body).unwrap();
        }
        html.push_str("</ol></section>");
        out.push(html);
    }
}

fn render_list(list: &RenderedList) -> String {
    let tag = if list.ordered { "ol" } else { "ul" };
    let mut html = format!("<{tag} class='content-{tag}'>");
    for item in &list.items {
        html.push_str("<li>");
        html.push_str(&item.text);
        for block in &item.blocks {
            html.push_str(block);
        }
        if let Some(nested) = &item.nested {
            html.push_str(&render_list(nested));
        }
        html.push_str("</li>");
    }
    write!(html, "</{tag}>").unwrap();
    html
}
