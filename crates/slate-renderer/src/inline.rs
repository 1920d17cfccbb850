//! Inline tokenizer shared by all backends.
//!
//! A fixed sequence of non-overlapping left-to-right passes over leaf
//! text: images, custom bracket tokens, links, footnote references,
//! inline code, then emphasis and strikethrough. Markup produced by an
//! earlier pass is protected behind a placeholder so later passes (and
//! the final HTML escape) never re-scan it.
//!
//! For the text formats there is no inline link syntax: links and
//! images are replaced by their label and collected into
//! [`InlineOutput::links`] in encounter order, for the backend to emit
//! as separate link lines after the owning block.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use slate_parser::Footnote;

use crate::escape::escape_html;
use crate::links::{Format, resolve};
use crate::tokens::{TokenArgs, TokenRegistry};

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"!\[([^\]]*)\]\(([^\s)]+)(?:\s+"([^"]*)")?\)"#).unwrap());
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[!([A-Z0-9_-]+)\]\s*\[([^\]]+)\]\(([^)]+)\)").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static FOOTNOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\^([^\]\s]+)\]").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static STRONG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static STRIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~([^~]+)~~").unwrap());

/// A link pulled out of inline text for formats without inline links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoistedLink {
    pub label: String,
    /// Already resolved for the active format.
    pub href: String,
}

/// Result of inline tokenization of one text payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineOutput {
    /// Processed text: entity-safe HTML, or plain text for the text
    /// formats.
    pub text: String,
    /// Hoisted links in source encounter order. Always empty for HTML.
    pub links: Vec<HoistedLink>,
}

/// Collector for spans that must survive later passes untouched.
///
/// Spans are swapped for private-use placeholder markers and swapped
/// back after the final pass.
#[derive(Debug, Default)]
struct Replacements {
    spans: Vec<String>,
}

const SPAN_OPEN: char = '\u{E000}';
const SPAN_CLOSE: char = '\u{E001}';

impl Replacements {
    fn protect(&mut self, span: String) -> String {
        self.spans.push(span);
        format!("{SPAN_OPEN}{}{SPAN_CLOSE}", self.spans.len() - 1)
    }

    /// Swap placeholders back for their spans. Spans may themselves
    /// contain placeholders from earlier passes, so this iterates until
    /// none remain.
    fn restore(&self, text: &str) -> String {
        let mut current = text.to_owned();
        while current.contains(SPAN_OPEN) {
            let mut next = String::with_capacity(current.len());
            let mut rest = current.as_str();
            while let Some(start) = rest.find(SPAN_OPEN) {
                next.push_str(&rest[..start]);
                let after = &rest[start + SPAN_OPEN.len_utf8()..];
                let Some(end) = after.find(SPAN_CLOSE) else {
                    rest = after;
                    break;
                };
                if let Ok(index) = after[..end].parse::<usize>() {
                    if let Some(span) = self.spans.get(index) {
                        next.push_str(span);
                    }
                }
                rest = &after[end + SPAN_CLOSE.len_utf8()..];
            }
            next.push_str(rest);
            current = next;
        }
        current
    }
}

/// Assigns footnote numbers in first-reference order against the
/// document's definitions.
#[derive(Debug)]
pub(crate) struct FootnoteTracker<'a> {
    defs: &'a [Footnote],
    order: Vec<String>,
}

impl<'a> FootnoteTracker<'a> {
    pub(crate) fn new(defs: &'a [Footnote]) -> Self {
        Self {
            defs,
            order: Vec::new(),
        }
    }

    /// Number for a reference, or `None` when no definition matches.
    fn reference(&mut self, label: &str) -> Option<usize> {
        if !self.defs.iter().any(|f| f.label == label) {
            return None;
        }
        if let Some(pos) = self.order.iter().position(|l| l == label) {
            return Some(pos + 1);
        }
        self.order.push(label.to_owned());
        Some(self.order.len())
    }

    /// Labels in first-reference order.
    pub(crate) fn into_order(self) -> Vec<String> {
        self.order
    }
}

/// Run the full inline pass sequence over one text payload.
pub(crate) fn render_inline(
    text: &str,
    format: Format,
    tokens: &TokenRegistry,
    notes: &mut FootnoteTracker<'_>,
) -> InlineOutput {
    let mut reps = Replacements::default();
    let mut links: Vec<HoistedLink> = Vec::new();

    let text = IMAGE_RE.replace_all(text, |c: &Captures<'_>| {
        let alt = &c[1];
        let src = &c[2];
        let caption = c.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
        match format {
            Format::Html => {
                let mut figure = format!(
                    r#"<figure class="content-figure"><img src="{}" alt="{}" class="content-image"/>"#,
                    escape_html(src),
                    escape_html(alt)
                );
                if !caption.is_empty() {
                    figure.push_str(&format!(
                        r#"<figcaption class="caption">{}</figcaption>"#,
                        escape_html(caption)
                    ));
                }
                figure.push_str("</figure>");
                reps.protect(figure)
            }
            Format::Gemtext | Format::Gopher => {
                links.push(HoistedLink {
                    label: alt.to_owned(),
                    href: resolve(src, format),
                });
                alt.to_owned()
            }
        }
    });

    let text = TOKEN_RE.replace_all(&text, |c: &Captures<'_>| {
        let name = &c[1];
        let args = TokenArgs {
            label: &c[2],
            href: &c[3],
        };
        match tokens.handler(name) {
            Some(handler) => {
                let out = handler(&args, format);
                if let Some(link) = out.link {
                    links.push(link);
                }
                match format {
                    Format::Html => reps.protect(out.text),
                    Format::Gemtext | Format::Gopher => out.text,
                }
            }
            None => {
                tracing::warn!(token = name, "unknown custom token left as literal text");
                // Protected in every format: the literal still contains
                // link syntax the later passes must not rewrite.
                match format {
                    Format::Html => reps.protect(escape_html(&c[0])),
                    Format::Gemtext | Format::Gopher => reps.protect(c[0].to_owned()),
                }
            }
        }
    });

    let text = LINK_RE.replace_all(&text, |c: &Captures<'_>| {
        let label = &c[1];
        let href = resolve(&c[2], format);
        match format {
            Format::Html => reps.protect(format!(
                r#"<a href="{}" class="content-link">{}</a>"#,
                escape_html(&href),
                escape_html(label)
            )),
            Format::Gemtext | Format::Gopher => {
                links.push(HoistedLink {
                    label: label.to_owned(),
                    href,
                });
                label.to_owned()
            }
        }
    });

    let text = FOOTNOTE_RE.replace_all(&text, |c: &Captures<'_>| {
        let label = &c[1];
        match notes.reference(label) {
            Some(number) => match format {
                Format::Html => reps.protect(format!(
                    r##"<sup class="content-footnote-ref"><a href="#fn-{}">[{number}]</a></sup>"##,
                    escape_html(label)
                )),
                Format::Gemtext | Format::Gopher => format!("[{number}]"),
            },
            None => {
                tracing::warn!(label, "footnote reference without a matching definition");
                match format {
                    Format::Html => reps.protect(format!(
                        r#"<sup class="content-footnote-ref">[^{}?]</sup>"#,
                        escape_html(label)
                    )),
                    Format::Gemtext | Format::Gopher => format!("[^{label}?]"),
                }
            }
        }
    });

    let text = CODE_RE.replace_all(&text, |c: &Captures<'_>| match format {
        Format::Html => reps.protect(format!(
            r#"<code class="content-code">{}</code>"#,
            escape_html(&c[1])
        )),
        Format::Gemtext | Format::Gopher => c[1].to_owned(),
    });

    let text = STRONG_RE.replace_all(&text, |c: &Captures<'_>| match format {
        Format::Html => reps.protect(format!("<strong>{}</strong>", escape_html(&c[1]))),
        Format::Gemtext | Format::Gopher => c[1].to_owned(),
    });
    let text = EMPHASIS_RE.replace_all(&text, |c: &Captures<'_>| match format {
        Format::Html => reps.protect(format!("<em>{}</em>", escape_html(&c[1]))),
        Format::Gemtext | Format::Gopher => c[1].to_owned(),
    });
    let text = STRIKE_RE.replace_all(&text, |c: &Captures<'_>| match format {
        Format::Html => reps.protect(format!("<s>{}</s>", escape_html(&c[1]))),
        Format::Gemtext | Format::Gopher => c[1].to_owned(),
    });

    let text = match format {
        Format::Html => reps.restore(&escape_html(&text)),
        Format::Gemtext | Format::Gopher => reps.restore(&text),
    };

    InlineOutput { text, links }
}
