//! Hand-written markdown block parser.
//!
//! Parses a markdown document into a flat sequence of [`Block`] values
//! (the block AST) plus a collection of footnote definitions. Parsing is
//! total: malformed input degrades to the closest literal interpretation
//! instead of failing.
//!
//! # Example
//!
//! ```
//! use slate_parser::{parse, Block};
//!
//! let doc = parse("# Hello\n\nSome text.");
//! assert!(matches!(&doc.blocks[0], Block::Heading { level: 1, .. }));
//! assert!(matches!(&doc.blocks[1], Block::Paragraph { .. }));
//! ```

mod block;
mod parser;
mod slug;

pub use block::{Block, CalloutKind, Document, Footnote, List, ListItem};
pub use parser::parse;
pub use slug::{SlugCounter, slugify};
