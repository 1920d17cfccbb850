//! The render backend trait and the walker's pre-rendered shapes.

use slate_parser::CalloutKind;

use crate::context::RenderContext;
use crate::inline::HoistedLink;
use crate::links::Format;

/// A list with inline-processed item text, ready for a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedList {
    pub ordered: bool,
    pub items: Vec<RenderedItem>,
}

/// One pre-rendered list item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedItem {
    pub text: String,
    /// Continuation blocks, each already rendered to output segments.
    pub blocks: Vec<String>,
    pub nested: Option<RenderedList>,
}

/// One entry of the footnote section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFootnote {
    pub label: String,
    /// 1-based display number.
    pub index: usize,
    pub body: String,
}

/// Format-specific rendering primitives.
///
/// The walker owns traversal, inline tokenization and link hoisting;
/// backends only turn pre-processed pieces into output segments.
/// Segments are joined with [`SEPARATOR`](Self::SEPARATOR) — one
/// segment per block for HTML and Gemtext, one segment per menu line
/// for Gopher.
///
/// Text arriving in `heading`, `code_block` and `image` is raw and must
/// be escaped by backends that need it; `paragraph`, `table` cells,
/// list item text and footnote bodies arrive already processed by the
/// inline tokenizer.
pub trait RenderBackend {
    const FORMAT: Format;
    const SEPARATOR: &'static str;
    /// Whether the output ends with a final separator (Gopher's
    /// trailing CRLF).
    const TRAILING_SEPARATOR: bool;

    /// Title/description/datetime header the text formats emit before
    /// the body. No-op for HTML, which gets these through its template.
    fn document_header(ctx: &RenderContext, out: &mut Vec<String>);

    fn heading(level: u8, text: &str, id: &str, ctx: &RenderContext, out: &mut Vec<String>);

    fn paragraph(text: &str, ctx: &RenderContext, out: &mut Vec<String>);

    fn code_block(language: Option<&str>, text: &str, ctx: &RenderContext, out: &mut Vec<String>);

    /// Cells arrive inline-rendered and rectangular.
    fn table(headers: &[String], rows: &[Vec<String>], ctx: &RenderContext, out: &mut Vec<String>);

    /// Blockquote (`kind` is `None`) or callout. `children` are the
    /// quote's inner blocks, already rendered to segments.
    fn quote(
        kind: Option<CalloutKind>,
        children: &[String],
        ctx: &RenderContext,
        out: &mut Vec<String>,
    );

    fn image(
        src: &str,
        alt: &str,
        caption: Option<&str>,
        ctx: &RenderContext,
        out: &mut Vec<String>,
    );

    fn horizontal_rule(ctx: &RenderContext, out: &mut Vec<String>);

    fn list(list: &RenderedList, ctx: &RenderContext, out: &mut Vec<String>);

    /// Hoisted links emitted after the owning block. No-op for HTML,
    /// which inlines links at their origin.
    fn links(links: &[HoistedLink], ctx: &RenderContext, out: &mut Vec<String>);

    /// Footnote section, in first-reference order.
    fn footnotes(notes: &[RenderedFootnote], ctx: &RenderContext, out: &mut Vec<String>);
}
