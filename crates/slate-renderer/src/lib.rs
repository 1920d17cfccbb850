//! Format renderers for the slate block AST.
//!
//! One generic walker, [`DocumentRenderer`], drives three zero-sized
//! backends: [`HtmlBackend`], [`GemtextBackend`] and [`GopherBackend`].
//! Inline markup (links, images, custom tokens, code spans, emphasis)
//! is processed by a shared tokenizer; formats without inline link
//! syntax get links hoisted into separate link lines after the owning
//! block. `{{variable}}` substitution over the rendered output is
//! handled by [`VariableRegistry`].
//!
//! # Example
//!
//! ```
//! use slate_renderer::{DocumentRenderer, HtmlBackend, RenderContext};
//!
//! let renderer = DocumentRenderer::<HtmlBackend>::new();
//! let html = renderer.render_document("# Hello", &RenderContext::default());
//! assert!(html.contains("<h1 class='content-h1' id='hello'>Hello</h1>"));
//! ```

mod backend;
mod context;
mod escape;
mod gemtext;
mod gopher;
mod html;
mod inline;
mod links;
mod renderer;
mod toc;
mod tokens;
mod vars;

pub use backend::{RenderBackend, RenderedFootnote, RenderedItem, RenderedList};
pub use context::RenderContext;
pub use escape::escape_html;
pub use gemtext::GemtextBackend;
pub use gopher::GopherBackend;
pub use html::HtmlBackend;
pub use inline::{HoistedLink, InlineOutput};
pub use links::{Format, resolve};
pub use renderer::DocumentRenderer;
pub use toc::toc_html;
pub use tokens::{TokenArgs, TokenHandler, TokenOutput, TokenRegistry};
pub use vars::{VariableRegistry, VariableResolver};
