//! Block AST types.
//!
//! The parser is the sole producer of these values; renderers only read
//! them. Nothing here is mutated after construction.

/// Callout kinds recognized in `> [!KIND]` blockquote heads.
///
/// Anything outside this set degrades to a plain [`Block::Blockquote`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalloutKind {
    Note,
    Warning,
    Danger,
    Success,
    Tip,
}

impl CalloutKind {
    /// Parse an upper-case kind tag (`NOTE`, `WARNING`, ...).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "NOTE" => Some(Self::Note),
            "WARNING" => Some(Self::Warning),
            "DANGER" => Some(Self::Danger),
            "SUCCESS" => Some(Self::Success),
            "TIP" => Some(Self::Tip),
            _ => None,
        }
    }

    /// Lower-case name used in CSS classes (`callout-note`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Success => "success",
            Self::Tip => "tip",
        }
    }

    /// Capitalized display title (`Note`, `Warning`).
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
            Self::Success => "Success",
            Self::Tip => "Tip",
        }
    }
}

/// A list block. `ordered` is fixed by the first marker of the run;
/// marker kind is local to each list, nested lists decide their own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// One list item: inline text, optional continuation blocks, and at
/// most one nested list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    /// Inline text of the item line (and same-indent continuation lines).
    pub text: String,
    /// Block-shaped continuation content indented under the item.
    pub blocks: Vec<Block>,
    /// Nested list attached to this item, if any.
    pub nested: Option<List>,
}

impl ListItem {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blocks: Vec::new(),
            nested: None,
        }
    }
}

/// A footnote definition (`[^label]: body`), lifted out of normal flow.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footnote {
    pub label: String,
    pub body: String,
}

/// One structural unit of a parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// `# Heading` with a deterministic slug id for anchors/ToC.
    Heading { level: u8, text: String, id: String },
    Paragraph {
        text: String,
    },
    List(List),
    /// Fenced code. Fence markers are not preserved.
    CodeBlock {
        language: Option<String>,
        text: String,
    },
    /// Rectangular table: every row has exactly `headers.len()` cells.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Blockquote {
        children: Vec<Block>,
    },
    Callout {
        kind: CalloutKind,
        children: Vec<Block>,
    },
    /// Standalone `![alt](src "caption")` line.
    Image {
        src: String,
        alt: String,
        caption: Option<String>,
    },
    HorizontalRule,
}

/// A parsed document: ordered blocks plus footnote definitions in
/// definition order. `[^label]` references stay inline in block text
/// and are resolved at render time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    pub blocks: Vec<Block>,
    pub footnotes: Vec<Footnote>,
}

impl Document {
    /// Look up a footnote definition by label.
    #[must_use]
    pub fn footnote(&self, label: &str) -> Option<&Footnote> {
        self.footnotes.iter().find(|f| f.label == label)
    }

    /// Text of the first H1 or H2 heading, used as the document title
    /// when no explicit title is supplied.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading { level: 1 | 2, text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
