//! Generic document renderer with pluggable backend.

use std::marker::PhantomData;

use slate_parser::{Block, Document, List};

use crate::backend::{RenderBackend, RenderedFootnote, RenderedItem, RenderedList};
use crate::context::RenderContext;
use crate::inline::{FootnoteTracker, HoistedLink, render_inline};
use crate::tokens::TokenRegistry;

/// Walks a [`Document`] and produces the output string for one format.
///
/// Traversal, inline tokenization, link hoisting and footnote ordering
/// live here; the backend only turns pre-processed pieces into output
/// segments. Construction is cheap; one renderer can serve any number
/// of render calls.
///
/// # Example
///
/// ```
/// use slate_renderer::{DocumentRenderer, GemtextBackend, RenderContext};
///
/// let renderer = DocumentRenderer::<GemtextBackend>::new();
/// let out = renderer.render_document("see [docs](docs.md)", &RenderContext::default());
/// assert!(out.contains("=> docs.gmi docs"));
/// ```
pub struct DocumentRenderer<B: RenderBackend> {
    tokens: TokenRegistry,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> DocumentRenderer<B> {
    /// Renderer with the default custom-token handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: TokenRegistry::default(),
            _backend: PhantomData,
        }
    }

    /// Replace the custom-token registry.
    #[must_use]
    pub fn with_tokens(mut self, tokens: TokenRegistry) -> Self {
        self.tokens = tokens;
        self
    }

    /// Render a parsed document.
    #[must_use]
    pub fn render(&self, doc: &Document, ctx: &RenderContext) -> String {
        let mut out: Vec<String> = Vec::new();
        B::document_header(ctx, &mut out);

        let mut notes = FootnoteTracker::new(&doc.footnotes);
        for block in &doc.blocks {
            self.render_block(block, ctx, &mut notes, &mut out);
        }
        self.render_footnote_section(doc, ctx, notes, &mut out);

        let mut rendered = out.join(B::SEPARATOR);
        if B::TRAILING_SEPARATOR && !rendered.is_empty() {
            rendered.push_str(B::SEPARATOR);
        }
        rendered
    }

    /// Parse and render markdown text in one step.
    #[must_use]
    pub fn render_document(&self, markdown: &str, ctx: &RenderContext) -> String {
        self.render(&slate_parser::parse(markdown), ctx)
    }

    fn render_block(
        &self,
        block: &Block,
        ctx: &RenderContext,
        notes: &mut FootnoteTracker<'_>,
        out: &mut Vec<String>,
    ) {
        match block {
            Block::Heading { level, text, id } => B::heading(*level, text, id, ctx, out),
            Block::Paragraph { text } => {
                let inline = render_inline(text, B::FORMAT, &self.tokens, notes);
                B::paragraph(&inline.text, ctx, out);
                B::links(&inline.links, ctx, out);
            }
            Block::List(list) => {
                let mut links = Vec::new();
                let rendered = self.render_list(list, ctx, notes, &mut links);
                B::list(&rendered, ctx, out);
                B::links(&links, ctx, out);
            }
            Block::CodeBlock { language, text } => {
                B::code_block(language.as_deref(), text, ctx, out);
            }
            Block::Table { headers, rows } => {
                let mut links = Vec::new();
                let headers: Vec<String> = headers
                    .iter()
                    .map(|cell| self.render_cell(cell, ctx, notes, &mut links))
                    .collect();
                let rows: Vec<Vec<String>> = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|cell| self.render_cell(cell, ctx, notes, &mut links))
                            .collect()
                    })
                    .collect();
                B::table(&headers, &rows, ctx, out);
                B::links(&links, ctx, out);
            }
            Block::Blockquote { children } => {
                let segments = self.render_children(children, ctx, notes);
                B::quote(None, &segments, ctx, out);
            }
            Block::Callout { kind, children } => {
                let segments = self.render_children(children, ctx, notes);
                B::quote(Some(*kind), &segments, ctx, out);
            }
            Block::Image { src, alt, caption } => {
                B::image(src, alt, caption.as_deref(), ctx, out);
            }
            Block::HorizontalRule => B::horizontal_rule(ctx, out),
        }
    }

    fn render_cell(
        &self,
        cell: &str,
        _ctx: &RenderContext,
        notes: &mut FootnoteTracker<'_>,
        links: &mut Vec<HoistedLink>,
    ) -> String {
        let inline = render_inline(cell, B::FORMAT, &self.tokens, notes);
        links.extend(inline.links);
        inline.text
    }

    fn render_children(
        &self,
        blocks: &[Block],
        ctx: &RenderContext,
        notes: &mut FootnoteTracker<'_>,
    ) -> Vec<String> {
        let mut out = Vec::new();
        for block in blocks {
            self.render_block(block, ctx, notes, &mut out);
        }
        out
    }

    fn render_list(
        &self,
        list: &List,
        ctx: &RenderContext,
        notes: &mut FootnoteTracker<'_>,
        links: &mut Vec<HoistedLink>,
    ) -> RenderedList {
        let items = list
            .items
            .iter()
            .map(|item| {
                let inline = render_inline(&item.text, B::FORMAT, &self.tokens, notes);
                links.extend(inline.links);
                RenderedItem {
                    text: inline.text,
                    blocks: self.render_children(&item.blocks, ctx, notes),
                    nested: item
                        .nested
                        .as_ref()
                        .map(|nested| self.render_list(nested, ctx, notes, links)),
                }
            })
            .collect();
        RenderedList {
            ordered: list.ordered,
            items,
        }
    }

    /// Referenced footnotes first, in first-reference order, then any
    /// unreferenced definitions in definition order.
    fn render_footnote_section(
        &self,
        doc: &Document,
        ctx: &RenderContext,
        notes: FootnoteTracker<'_>,
        out: &mut Vec<String>,
    ) {
        if doc.footnotes.is_empty() {
            return;
        }
        let order = notes.into_order();
        let mut links = Vec::new();
        let mut rendered = Vec::new();
        let mut scratch = FootnoteTracker::new(&[]);
        for label in &order {
            if let Some(def) = doc.footnote(label) {
                let inline = render_inline(&def.body, B::FORMAT, &self.tokens, &mut scratch);
                links.extend(inline.links);
                rendered.push(RenderedFootnote {
                    label: label.clone(),
                    index: rendered.len() + 1,
                    body: inline.text,
                });
            }
        }
        for def in &doc.footnotes {
            if !order.contains(&def.label) {
                let inline = render_inline(&def.body, B::FORMAT, &self.tokens, &mut scratch);
                links.extend(inline.links);
                rendered.push(RenderedFootnote {
                    label: def.label.clone(),
                    index: rendered.len() + 1,
                    body: inline.text,
                });
            }
        }
        B::footnotes(&rendered, ctx, out);
        B::links(&links, ctx, out);
    }
}

impl<B: RenderBackend> Default for DocumentRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}
