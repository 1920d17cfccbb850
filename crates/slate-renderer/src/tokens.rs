//! Custom bracket-token registry.
//!
//! Tokens have the shape `[!TOKEN] [label](href)` and render through a
//! registered handler. Handlers receive the active format, so one token
//! name can render differently per format. Unknown tokens are left as
//! literal text so authors notice typos.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;
use crate::inline::HoistedLink;
use crate::links::{Format, resolve};

static URL_SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+://").unwrap());

/// Label and target of a bracket token occurrence.
#[derive(Clone, Copy, Debug)]
pub struct TokenArgs<'a> {
    pub label: &'a str,
    pub href: &'a str,
}

/// What a token handler produced.
///
/// `text` replaces the token in the surrounding text (already
/// format-safe markup for HTML, plain text otherwise). `link` is
/// hoisted after the owning block by the text formats.
#[derive(Clone, Debug)]
pub struct TokenOutput {
    pub text: String,
    pub link: Option<HoistedLink>,
}

impl TokenOutput {
    fn inline(text: String) -> Self {
        Self { text, link: None }
    }
}

/// Handler invoked for one token occurrence.
pub type TokenHandler = fn(&TokenArgs<'_>, Format) -> TokenOutput;

/// Immutable name-to-handler map, built once and passed into renderer
/// construction. Names are matched case-insensitively (stored upper).
#[derive(Clone, Debug)]
pub struct TokenRegistry {
    handlers: HashMap<String, TokenHandler>,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
        };
        registry.register("MD-PAGE", md_page);
        registry.register("BUTTON", button);
        registry.register("EXTERNAL", external);
        registry
    }
}

impl TokenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry without the default handlers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, handler: TokenHandler) {
        self.handlers.insert(name.to_uppercase(), handler);
    }

    #[must_use]
    pub fn handler(&self, name: &str) -> Option<TokenHandler> {
        self.handlers.get(&name.to_uppercase()).copied()
    }
}

/// `[!MD-PAGE]`: a page link with the `.md` extension rewritten for the
/// active format.
fn md_page(args: &TokenArgs<'_>, format: Format) -> TokenOutput {
    let href = resolve(args.href, format);
    match format {
        Format::Html => TokenOutput::inline(format!(
            r#"<a href="{}" class="content-md_page">{}</a>"#,
            escape_html(&href),
            escape_html(args.label)
        )),
        Format::Gemtext | Format::Gopher => TokenOutput {
            text: args.label.to_owned(),
            link: Some(HoistedLink {
                label: args.label.to_owned(),
                href,
            }),
        },
    }
}

/// `[!BUTTON]`: a navigation button in HTML, a plain hoisted link in
/// the text formats.
fn button(args: &TokenArgs<'_>, format: Format) -> TokenOutput {
    match format {
        Format::Html => TokenOutput::inline(format!(
            r#"<button class="content-button" onclick="window.location.href='{}'">{}</button>"#,
            escape_html(args.href),
            escape_html(args.label)
        )),
        Format::Gemtext | Format::Gopher => TokenOutput {
            text: args.label.to_owned(),
            link: Some(HoistedLink {
                label: args.label.to_owned(),
                href: args.href.to_owned(),
            }),
        },
    }
}

/// `[!EXTERNAL]`: an outbound link. Bare hosts with a well-known
/// suffix get their protocol prepended; the display label is cleaned of
/// protocol and `www.` noise.
fn external(args: &TokenArgs<'_>, format: Format) -> TokenOutput {
    let href = externalize(args.href);
    let label = clean_label(args.label);
    match format {
        Format::Html => TokenOutput::inline(format!(
            r#"<a href="{}" class="content-external">{}</a>"#,
            escape_html(&href),
            escape_html(&label)
        )),
        Format::Gemtext | Format::Gopher => TokenOutput {
            text: label.clone(),
            link: Some(HoistedLink { label, href }),
        },
    }
}

fn externalize(href: &str) -> String {
    if URL_SCHEME_RE.is_match(href)
        || href.starts_with('/')
        || href.starts_with("./")
        || href.starts_with("../")
    {
        return href.to_owned();
    }
    if href.ends_with(".onion") {
        format!("http://{href}")
    } else if href.ends_with(".gopher") {
        format!("gopher://{href}")
    } else if href.ends_with(".gemini") {
        format!("gemini://{href}")
    } else if href.ends_with(".eth") || href.starts_with("www.") {
        format!("https://{href}")
    } else {
        href.to_owned()
    }
}

fn clean_label(label: &str) -> String {
    let stripped = URL_SCHEME_RE.replace(label, "");
    stripped
        .strip_prefix("www.")
        .unwrap_or(&stripped)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(registry: &TokenRegistry, name: &str, label: &str, href: &str, format: Format) -> TokenOutput {
        let handler = registry.handler(name).expect("handler registered");
        handler(&TokenArgs { label, href }, format)
    }

    #[test]
    fn test_md_page_html() {
        let registry = TokenRegistry::default();
        let out = run(&registry, "MD-PAGE", "Guide", "guide.md", Format::Html);
        assert_eq!(
            out.text,
            r#"<a href="guide.html" class="content-md_page">Guide</a>"#
        );
        assert!(out.link.is_none());
    }

    #[test]
    fn test_md_page_gemtext_hoists() {
        let registry = TokenRegistry::default();
        let out = run(&registry, "MD-PAGE", "Guide", "guide.md", Format::Gemtext);
        assert_eq!(out.text, "Guide");
        let link = out.link.expect("hoisted link");
        assert_eq!(link.href, "guide.gmi");
        assert_eq!(link.label, "Guide");
    }

    #[test]
    fn test_button_html() {
        let registry = TokenRegistry::default();
        let out = run(&registry, "BUTTON", "Go", "/home", Format::Html);
        assert_eq!(
            out.text,
            r#"<button class="content-button" onclick="window.location.href='/home'">Go</button>"#
        );
    }

    #[test]
    fn test_external_protocol_detection() {
        assert_eq!(externalize("example.onion"), "http://example.onion");
        assert_eq!(externalize("example.gopher"), "gopher://example.gopher");
        assert_eq!(externalize("example.gemini"), "gemini://example.gemini");
        assert_eq!(externalize("vault.eth"), "https://vault.eth");
        assert_eq!(externalize("www.example.com"), "https://www.example.com");
        // Already-qualified and path-like targets stay raw.
        assert_eq!(externalize("https://example.com"), "https://example.com");
        assert_eq!(externalize("/files/archive.zip"), "/files/archive.zip");
        assert_eq!(externalize("example.com"), "example.com");
    }

    #[test]
    fn test_external_label_cleanup() {
        assert_eq!(clean_label("https://www.example.com"), "example.com");
        assert_eq!(clean_label("gemini://example.com"), "example.com");
        assert_eq!(clean_label("plain label"), "plain label");
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let registry = TokenRegistry::default();
        assert!(registry.handler("md-page").is_some());
        assert!(registry.handler("BUTTON").is_some());
        assert!(registry.handler("NOPE").is_none());
    }

    #[test]
    fn test_custom_registration() {
        fn badge(args: &TokenArgs<'_>, _format: Format) -> TokenOutput {
            TokenOutput {
                text: format!("[{}]", args.label),
                link: None,
            }
        }
        let mut registry = TokenRegistry::empty();
        registry.register("badge", badge);
        let out = run(&registry, "BADGE", "beta", "x", Format::Html);
        assert_eq!(out.text, "[beta]");
    }
}
