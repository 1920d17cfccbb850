//! Line-oriented block parser.
//!
//! A single forward pass over the document lines with unbounded
//! lookahead inside the current block's contiguous run. Block openers
//! are tested in a fixed priority order; the first match wins. Parsing
//! is total — malformed input degrades instead of erroring (unterminated
//! fences close at EOF, irregular table rows are rectangularized,
//! unknown callout kinds fall back to plain blockquotes).

use crate::block::{Block, CalloutKind, Document, Footnote, List, ListItem};
use crate::slug::SlugCounter;

/// Tab stops expanded to this width before indentation comparison.
const TAB_WIDTH: usize = 4;

/// Blockquote interiors are re-parsed recursively; quote markers nested
/// deeper than this stay literal text of the innermost quote.
const MAX_QUOTE_DEPTH: usize = 16;

/// Parse a markdown document into its block AST.
///
/// Total: never fails on malformed input.
#[must_use]
pub fn parse(text: &str) -> Document {
    let lines: Vec<&str> = text.lines().collect();
    let mut state = ParseState {
        slugs: SlugCounter::new(),
        footnotes: Vec::new(),
        quote_depth: 0,
    };
    let blocks = parse_lines(&lines, &mut state);
    Document {
        blocks,
        footnotes: state.footnotes,
    }
}

/// Shared state threaded through nested parses (blockquote interiors,
/// list-item continuation content) so slug ids stay unique and footnote
/// definitions land in one document-level collection.
struct ParseState {
    slugs: SlugCounter,
    footnotes: Vec<Footnote>,
    quote_depth: usize,
}

fn parse_lines(lines: &[&str], state: &mut ParseState) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if is_blank(line) {
            i += 1;
            continue;
        }

        if let Some((level, text)) = heading(line) {
            let id = state.slugs.assign(&text);
            blocks.push(Block::Heading { level, text, id });
            i += 1;
        } else if let Some(fence) = fence_open(line) {
            let (block, next) = consume_fence(lines, i, &fence);
            blocks.push(block);
            i = next;
        } else if is_table_start(lines, i) {
            let (block, next) = consume_table(lines, i);
            blocks.push(block);
            i = next;
        } else if is_horizontal_rule(line) {
            blocks.push(Block::HorizontalRule);
            i += 1;
        } else if list_marker(line).is_some() {
            let (block, next) = consume_list(lines, i, state);
            blocks.push(block);
            i = next;
        } else if quote_content(line).is_some() {
            let (block, next) = consume_blockquote(lines, i, state);
            blocks.push(block);
            i = next;
        } else if let Some((label, body)) = footnote_def(line) {
            let (body, next) = consume_footnote_body(lines, i + 1, body);
            state.footnotes.push(Footnote { label, body });
            i = next;
        } else if let Some((alt, src, caption)) = image_line(line) {
            blocks.push(Block::Image { src, alt, caption });
            i += 1;
        } else {
            let (block, next) = consume_paragraph(lines, i);
            blocks.push(block);
            i = next;
        }
    }

    blocks
}

// ---------------------------------------------------------------------------
// Line classification

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Leading whitespace width with tabs expanded.
fn indent_of(line: &str) -> usize {
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH - (width % TAB_WIDTH),
            _ => break,
        }
    }
    width
}

/// Strip up to `cols` columns of leading whitespace.
fn dedent(line: &str, cols: usize) -> &str {
    let mut width = 0;
    for (pos, ch) in line.char_indices() {
        if width >= cols {
            return &line[pos..];
        }
        match ch {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH - (width % TAB_WIDTH),
            _ => return &line[pos..],
        }
    }
    ""
}

/// `# Heading` through `###### Heading`; trailing `#` runs stripped.
fn heading(line: &str) -> Option<(u8, String)> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &trimmed[hashes..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let text = rest.trim().trim_end_matches('#').trim_end();
    #[allow(clippy::cast_possible_truncation)]
    Some((hashes as u8, text.to_owned()))
}

struct Fence {
    marker: char,
    len: usize,
    language: Option<String>,
}

/// `≥3` backticks or tildes, optional language tag on the same line.
fn fence_open(line: &str) -> Option<Fence> {
    let trimmed = line.trim_start();
    let marker = match trimmed.chars().next() {
        Some(c @ ('`' | '~')) => c,
        _ => return None,
    };
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len..].trim();
    // A backtick info string containing backticks is not a fence opener.
    if marker == '`' && info.contains('`') {
        return None;
    }
    let language = info
        .split_whitespace()
        .next()
        .map(std::borrow::ToOwned::to_owned);
    Some(Fence { marker, len, language })
}

fn fence_close(line: &str, fence: &Fence) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.chars().all(|c| c == fence.marker)
        && trimmed.len() >= fence.len
}

fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    let marker = match trimmed.chars().next() {
        Some(c @ ('-' | '*' | '_')) => c,
        _ => return false,
    };
    let count = trimmed.chars().filter(|&c| c == marker).count();
    count >= 3 && trimmed.chars().all(|c| c == marker || c == ' ')
}

struct Marker {
    /// Column of the marker character.
    indent: usize,
    /// Column where the item's content starts.
    content_col: usize,
    ordered: bool,
    content: String,
}

fn list_marker(line: &str) -> Option<Marker> {
    let indent = indent_of(line);
    let trimmed = line.trim_start();

    let (marker_len, ordered) = match trimmed.chars().next() {
        Some('-' | '*' | '+') => (1, false),
        Some(c) if c.is_ascii_digit() => {
            let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
            if digits > 9 || !trimmed[digits..].starts_with('.') {
                return None;
            }
            (digits + 1, true)
        }
        _ => return None,
    };

    let rest = &trimmed[marker_len..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let content = rest.trim_start();
    let spaces = rest.len() - content.len();
    Some(Marker {
        indent,
        content_col: indent + marker_len + spaces,
        ordered,
        content: content.to_owned(),
    })
}

/// Content of a `>`-prefixed line with one quote level stripped.
fn quote_content(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// `[^label]: body`
fn footnote_def(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix("[^")?;
    let close = rest.find("]:")?;
    let label = &rest[..close];
    if label.is_empty() || label.contains(' ') {
        return None;
    }
    let body = rest[close + 2..].trim();
    Some((label.to_owned(), body.to_owned()))
}

/// A line whose entire content is `![alt](src "caption")`.
fn image_line(line: &str) -> Option<(String, String, Option<String>)> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix("![")?;
    let close = rest.find(']')?;
    let alt = &rest[..close];
    let target = rest[close + 1..].strip_prefix('(')?.strip_suffix(')')?;
    if target.contains(')') {
        return None;
    }
    let (src, caption) = match target.find(char::is_whitespace) {
        Some(pos) => {
            let caption = target[pos..].trim().trim_matches('"').trim();
            let caption = (!caption.is_empty()).then(|| caption.to_owned());
            (&target[..pos], caption)
        }
        None => (target, None),
    };
    if src.is_empty() {
        return None;
    }
    Some((alt.to_owned(), src.to_owned(), caption))
}

fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_owned()).collect()
}

fn is_delimiter_row(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.contains('-') || !trimmed.contains('|') {
        return false;
    }
    split_row(line).iter().all(|cell| {
        let body = cell.trim_matches(':');
        !body.is_empty() && body.chars().all(|c| c == '-')
    })
}

/// A header line followed immediately by a delimiter row.
fn is_table_start(lines: &[&str], i: usize) -> bool {
    lines[i].contains('|')
        && lines
            .get(i + 1)
            .is_some_and(|next| is_delimiter_row(next))
}

/// Would this line terminate a paragraph by opening another block?
fn opens_block(lines: &[&str], i: usize) -> bool {
    let line = lines[i];
    heading(line).is_some()
        || fence_open(line).is_some()
        || is_table_start(lines, i)
        || is_horizontal_rule(line)
        || list_marker(line).is_some()
        || quote_content(line).is_some()
        || footnote_def(line).is_some()
        || image_line(line).is_some()
}

// ---------------------------------------------------------------------------
// Block consumers

fn consume_fence(lines: &[&str], start: usize, fence: &Fence) -> (Block, usize) {
    let mut body = Vec::new();
    let mut i = start + 1;
    while i < lines.len() {
        if fence_close(lines[i], fence) {
            i += 1;
            break;
        }
        body.push(lines[i]);
        i += 1;
    }
    // Unterminated fences close implicitly at end of document.
    let mut text = body.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    (
        Block::CodeBlock {
            language: fence.language.clone(),
            text,
        },
        i,
    )
}

fn consume_table(lines: &[&str], start: usize) -> (Block, usize) {
    let headers = split_row(lines[start]);
    let width = headers.len();
    let mut rows = Vec::new();
    let mut i = start + 2;
    while i < lines.len() && lines[i].contains('|') && !is_blank(lines[i]) {
        let mut row = split_row(lines[i]);
        // Rectangularize: short rows padded, long rows truncated.
        row.resize(width, String::new());
        rows.push(row);
        i += 1;
    }
    (Block::Table { headers, rows }, i)
}

fn consume_blockquote(lines: &[&str], start: usize, state: &mut ParseState) -> (Block, usize) {
    let mut inner: Vec<&str> = Vec::new();
    let mut i = start;
    while i < lines.len() {
        match quote_content(lines[i]) {
            Some(content) => inner.push(content),
            None => break,
        }
        i += 1;
    }

    // `[!KIND]` head reclassifies the quote as a callout.
    let mut kind = None;
    if let Some(first) = inner.first() {
        let trimmed = first.trim_start();
        if let Some(rest) = trimmed.strip_prefix("[!") {
            if let Some(close) = rest.find(']') {
                if let Some(parsed) = CalloutKind::from_tag(&rest[..close]) {
                    kind = Some(parsed);
                    let remainder = rest[close + 1..].trim_start();
                    if remainder.is_empty() {
                        inner.remove(0);
                    } else {
                        inner[0] = remainder;
                    }
                }
            }
        }
    }

    let children = if state.quote_depth >= MAX_QUOTE_DEPTH {
        // Nested too deep: keep the interior as literal paragraph text.
        vec![Block::Paragraph {
            text: inner.join(" "),
        }]
    } else {
        state.quote_depth += 1;
        let children = parse_lines(&inner, state);
        state.quote_depth -= 1;
        children
    };

    let block = match kind {
        Some(kind) => Block::Callout { kind, children },
        None => Block::Blockquote { children },
    };
    (block, i)
}

fn consume_footnote_body(lines: &[&str], start: usize, first: String) -> (String, usize) {
    let mut body = first;
    let mut i = start;
    // Indented lines continue the definition body.
    while i < lines.len() && !is_blank(lines[i]) && indent_of(lines[i]) >= 2 {
        if !body.is_empty() {
            body.push(' ');
        }
        body.push_str(lines[i].trim());
        i += 1;
    }
    (body, i)
}

fn consume_paragraph(lines: &[&str], start: usize) -> (Block, usize) {
    let mut parts = vec![lines[start].trim()];
    let mut i = start + 1;
    while i < lines.len() && !is_blank(lines[i]) && !opens_block(lines, i) {
        parts.push(lines[i].trim());
        i += 1;
    }
    (
        Block::Paragraph {
            text: parts.join(" "),
        },
        i,
    )
}

// ---------------------------------------------------------------------------
// List parsing: explicit stack of open-list frames keyed by indentation,
// so pathological nesting depth cannot exhaust the call stack.

struct Frame {
    /// Marker column that opened this list.
    indent: usize,
    /// Content column of the frame's current item.
    content_col: usize,
    list: List,
    /// Continuation lines of the current item, dedented, pending a
    /// nested block parse.
    pending: Vec<String>,
    /// A blank line was seen since the current item's marker line.
    blank_seen: bool,
}

impl Frame {
    fn open(marker: &Marker) -> Self {
        Self {
            indent: marker.indent,
            content_col: marker.content_col,
            list: List {
                ordered: marker.ordered,
                items: vec![ListItem::text(marker.content.clone())],
            },
            pending: Vec::new(),
            blank_seen: false,
        }
    }

    fn start_item(&mut self, marker: &Marker, state: &mut ParseState) {
        self.flush_pending(state);
        self.content_col = marker.content_col;
        self.blank_seen = false;
        self.list.items.push(ListItem::text(marker.content.clone()));
    }

    fn flush_pending(&mut self, state: &mut ParseState) {
        if self.pending.is_empty() {
            return;
        }
        let pending: Vec<&str> = self.pending.iter().map(String::as_str).collect();
        let blocks = parse_lines(&pending, state);
        self.pending.clear();
        if let Some(item) = self.list.items.last_mut() {
            item.blocks.extend(blocks);
        }
    }
}

fn consume_list(lines: &[&str], start: usize, state: &mut ParseState) -> (Block, usize) {
    let first = list_marker(lines[start]).expect("caller checked the opener");
    let mut stack = vec![Frame::open(&first)];
    let mut i = start + 1;

    while i < lines.len() {
        let line = lines[i];

        if is_blank(line) {
            // The list survives a blank line only when the next
            // non-blank line still belongs to it.
            let next = lines[i + 1..].iter().position(|l| !is_blank(l));
            let Some(offset) = next else { break };
            let next_line = lines[i + 1 + offset];
            let base = stack[0].indent;
            let continues = match list_marker(next_line) {
                Some(marker) => marker.indent >= base,
                None => indent_of(next_line) > current_frame(&stack).indent,
            };
            if !continues {
                break;
            }
            for frame in &mut stack {
                frame.blank_seen = true;
            }
            i += 1;
            continue;
        }

        if let Some(marker) = list_marker(line) {
            let top = current_frame(&stack);
            if marker.indent > top.indent {
                // Deeper marker opens a nested list under the current item.
                stack.last_mut().expect("stack is never empty").flush_pending(state);
                stack.push(Frame::open(&marker));
            } else {
                // Pop to the frame this marker belongs to.
                while stack.len() > 1 && marker.indent < current_frame(&stack).indent {
                    pop_frame(&mut stack, state);
                }
                if marker.indent < stack[0].indent {
                    break;
                }
                stack
                    .last_mut()
                    .expect("stack is never empty")
                    .start_item(&marker, state);
            }
            i += 1;
            continue;
        }

        // Continuation content: strictly deeper than the current item's
        // marker column.
        let indent = indent_of(line);
        let top = stack.last_mut().expect("stack is never empty");
        if indent <= top.indent {
            break;
        }
        let dedented = dedent(line, top.content_col);
        let single = [dedented];
        if top.pending.is_empty() && !top.blank_seen && !opens_block(&single, 0) {
            // Lazy continuation of the item's own line.
            if let Some(item) = top.list.items.last_mut() {
                item.text.push(' ');
                item.text.push_str(dedented.trim());
            }
        } else {
            if top.blank_seen && !top.pending.is_empty() {
                top.pending.push(String::new());
            }
            top.blank_seen = false;
            top.pending.push(dedented.to_owned());
        }
        i += 1;
    }

    while stack.len() > 1 {
        pop_frame(&mut stack, state);
    }
    let mut root = stack.pop().expect("stack is never empty");
    root.flush_pending(state);
    (Block::List(root.list), i)
}

fn current_frame(stack: &[Frame]) -> &Frame {
    stack.last().expect("stack is never empty")
}

fn pop_frame(stack: &mut Vec<Frame>, state: &mut ParseState) {
    let mut finished = stack.pop().expect("caller checked length");
    finished.flush_pending(state);
    let parent = stack.last_mut().expect("caller checked length");
    let item = parent
        .list
        .items
        .last_mut()
        .expect("a frame is only pushed after its parent has an item");
    match &mut item.nested {
        // An item owns at most one nested list; a second deeper run is
        // merged into the existing one.
        Some(existing) => existing.items.extend(finished.list.items),
        None => item.nested = Some(finished.list),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading_ids(doc: &Document) -> Vec<&str> {
        doc.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_heading_levels() {
        let doc = parse("# One\n\n### Three\n\n###### Six");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "One".into(),
                    id: "one".into()
                },
                Block::Heading {
                    level: 3,
                    text: "Three".into(),
                    id: "three".into()
                },
                Block::Heading {
                    level: 6,
                    text: "Six".into(),
                    id: "six".into()
                },
            ]
        );
    }

    #[test]
    fn test_heading_trailing_hashes_stripped() {
        let doc = parse("## Closed ##");
        assert_eq!(
            doc.blocks[0],
            Block::Heading {
                level: 2,
                text: "Closed".into(),
                id: "closed".into()
            }
        );
    }

    #[test]
    fn test_seven_hashes_is_paragraph() {
        let doc = parse("####### nope");
        assert!(matches!(&doc.blocks[0], Block::Paragraph { text } if text == "####### nope"));
    }

    #[test]
    fn test_duplicate_heading_ids_disambiguated() {
        let doc = parse("## FAQ\n\n## FAQ\n\n## FAQ");
        assert_eq!(heading_ids(&doc), vec!["faq", "faq-1", "faq-2"]);
    }

    #[test]
    fn test_paragraph_joins_lines() {
        let doc = parse("first line\nsecond line\n\nnext");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph {
                    text: "first line second line".into()
                },
                Block::Paragraph { text: "next".into() },
            ]
        );
    }

    #[test]
    fn test_fenced_code_with_language() {
        let doc = parse("```rust\nfn main() {}\n```\n");
        assert_eq!(
            doc.blocks[0],
            Block::CodeBlock {
                language: Some("rust".into()),
                text: "fn main() {}\n".into()
            }
        );
    }

    #[test]
    fn test_fence_unterminated_closes_at_eof() {
        let doc = parse("```\nlet x = 1;\nlet y = 2;");
        assert_eq!(
            doc.blocks[0],
            Block::CodeBlock {
                language: None,
                text: "let x = 1;\nlet y = 2;\n".into()
            }
        );
    }

    #[test]
    fn test_fence_close_requires_matching_length() {
        let doc = parse("````\n```\ninner\n```\n````");
        assert_eq!(
            doc.blocks[0],
            Block::CodeBlock {
                language: None,
                text: "```\ninner\n```\n".into()
            }
        );
    }

    #[test]
    fn test_tilde_fence() {
        let doc = parse("~~~python\nprint(1)\n~~~");
        assert_eq!(
            doc.blocks[0],
            Block::CodeBlock {
                language: Some("python".into()),
                text: "print(1)\n".into()
            }
        );
    }

    #[test]
    fn test_table_basic() {
        let doc = parse("| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |");
        assert_eq!(
            doc.blocks[0],
            Block::Table {
                headers: vec!["A".into(), "B".into()],
                rows: vec![
                    vec!["1".into(), "2".into()],
                    vec!["3".into(), "4".into()]
                ],
            }
        );
    }

    #[test]
    fn test_table_rows_rectangularized() {
        let doc = parse("| A | B | C |\n|---|---|---|\n| 1 | 2 |\n| 1 | 2 | 3 | 4 |");
        let Block::Table { headers, rows } = &doc.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(headers.len(), 3);
        assert_eq!(rows[0], vec!["1".to_owned(), "2".to_owned(), String::new()]);
        assert_eq!(rows[1], vec!["1".to_owned(), "2".to_owned(), "3".to_owned()]);
    }

    #[test]
    fn test_pipe_line_without_delimiter_is_paragraph() {
        let doc = parse("a | b\nplain");
        assert!(matches!(&doc.blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_horizontal_rule() {
        let doc = parse("---\n\n* * *\n\n___");
        assert_eq!(
            doc.blocks,
            vec![
                Block::HorizontalRule,
                Block::HorizontalRule,
                Block::HorizontalRule
            ]
        );
    }

    #[test]
    fn test_flat_unordered_list() {
        let doc = parse("- a\n- b\n- c");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert!(!list.ordered);
        let texts: Vec<&str> = list.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ordered_list() {
        let doc = parse("1. first\n2. second");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert!(list.ordered);
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn test_heading_then_nested_list() {
        let doc = parse("# Hello\n\n- a\n    - b\n- c");
        assert_eq!(
            doc.blocks[0],
            Block::Heading {
                level: 1,
                text: "Hello".into(),
                id: "hello".into()
            }
        );
        let Block::List(list) = &doc.blocks[1] else {
            panic!("expected list");
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].text, "a");
        assert_eq!(list.items[1].text, "c");
        let nested = list.items[0].nested.as_ref().expect("nested list");
        assert_eq!(nested.items.len(), 1);
        assert_eq!(nested.items[0].text, "b");
        assert!(nested.items[0].nested.is_none());
    }

    #[test]
    fn test_three_level_nesting_single_chain() {
        let doc = parse("- a\n    - b\n        - c");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        // Exactly one item per level, never a duplicated sibling list.
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(list.items.len(), 1);
        let l2 = list.items[0].nested.as_ref().expect("level 2");
        assert_eq!(l2.items.len(), 1);
        let l3 = l2.items[0].nested.as_ref().expect("level 3");
        assert_eq!(l3.items.len(), 1);
        assert_eq!(l3.items[0].text, "c");
    }

    #[test]
    fn test_mixed_marker_kinds_across_levels() {
        let doc = parse("- a\n    1. one\n    2. two\n- b");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 2);
        let nested = list.items[0].nested.as_ref().expect("nested");
        assert!(nested.ordered);
        assert_eq!(nested.items.len(), 2);
    }

    #[test]
    fn test_nested_list_pops_back_to_outer() {
        let doc = parse("- a\n    - a1\n    - a2\n- b\n    - b1");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].nested.as_ref().unwrap().items.len(), 2);
        assert_eq!(list.items[1].nested.as_ref().unwrap().items.len(), 1);
    }

    #[test]
    fn test_list_lazy_continuation() {
        let doc = parse("- first line\n  still first\n- second");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(list.items[0].text, "first line still first");
        assert_eq!(list.items[1].text, "second");
    }

    #[test]
    fn test_list_item_paragraph_continuation_becomes_block() {
        let doc = parse("- item\n\n  trailing paragraph\n- next");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].text, "item");
        assert_eq!(
            list.items[0].blocks,
            vec![Block::Paragraph {
                text: "trailing paragraph".into()
            }]
        );
    }

    #[test]
    fn test_list_item_code_continuation() {
        let doc = parse("- item\n  ```\n  code\n  ```\n- next");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert!(matches!(&list.items[0].blocks[0], Block::CodeBlock { .. }));
    }

    #[test]
    fn test_list_ends_at_unindented_text() {
        let doc = parse("- a\n- b\nplain paragraph");
        // Column 0 is not strictly deeper than the marker column, so the
        // line is not lazy continuation of item "b".
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(&doc.blocks[1], Block::Paragraph { text } if text == "plain paragraph"));
    }

    #[test]
    fn test_list_blank_then_outdent_ends_list() {
        let doc = parse("- a\n\nplain");
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(&doc.blocks[1], Block::Paragraph { .. }));
    }

    #[test]
    fn test_blockquote_simple() {
        let doc = parse("> quoted text\n> more");
        let Block::Blockquote { children } = &doc.blocks[0] else {
            panic!("expected blockquote");
        };
        assert_eq!(
            children,
            &vec![Block::Paragraph {
                text: "quoted text more".into()
            }]
        );
    }

    #[test]
    fn test_blockquote_nested() {
        let doc = parse("> outer\n> > inner");
        let Block::Blockquote { children } = &doc.blocks[0] else {
            panic!("expected blockquote");
        };
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[1], Block::Blockquote { .. }));
    }

    #[test]
    fn test_blockquote_contains_list() {
        let doc = parse("> intro:\n> - one\n> - two");
        let Block::Blockquote { children } = &doc.blocks[0] else {
            panic!("expected blockquote");
        };
        assert!(matches!(&children[0], Block::Paragraph { .. }));
        assert!(matches!(&children[1], Block::List(_)));
    }

    #[test]
    fn test_callout_note() {
        let doc = parse("> [!NOTE]\n> Remember this.");
        let Block::Callout { kind, children } = &doc.blocks[0] else {
            panic!("expected callout");
        };
        assert_eq!(*kind, CalloutKind::Note);
        assert_eq!(
            children,
            &vec![Block::Paragraph {
                text: "Remember this.".into()
            }]
        );
    }

    #[test]
    fn test_callout_inline_head_text() {
        let doc = parse("> [!WARNING] Careful now.");
        let Block::Callout { kind, children } = &doc.blocks[0] else {
            panic!("expected callout");
        };
        assert_eq!(*kind, CalloutKind::Warning);
        assert_eq!(
            children,
            &vec![Block::Paragraph {
                text: "Careful now.".into()
            }]
        );
    }

    #[test]
    fn test_unknown_callout_kind_degrades_to_blockquote() {
        let doc = parse("> [!BOGUS]\n> text");
        assert!(matches!(&doc.blocks[0], Block::Blockquote { .. }));
    }

    #[test]
    fn test_footnote_definition_lifted() {
        let doc = parse("body text [^a]\n\n[^a]: the definition");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(
            doc.footnotes,
            vec![Footnote {
                label: "a".into(),
                body: "the definition".into()
            }]
        );
    }

    #[test]
    fn test_footnote_body_continuation() {
        let doc = parse("[^long]: starts here\n    and continues");
        assert_eq!(doc.footnotes[0].body, "starts here and continues");
    }

    #[test]
    fn test_standalone_image_block() {
        let doc = parse("![diagram](flow.png \"The flow\")");
        assert_eq!(
            doc.blocks[0],
            Block::Image {
                src: "flow.png".into(),
                alt: "diagram".into(),
                caption: Some("The flow".into()),
            }
        );
    }

    #[test]
    fn test_image_without_caption() {
        let doc = parse("![x](a.png)");
        assert_eq!(
            doc.blocks[0],
            Block::Image {
                src: "a.png".into(),
                alt: "x".into(),
                caption: None,
            }
        );
    }

    #[test]
    fn test_inline_image_stays_in_paragraph() {
        let doc = parse("before ![x](a.png) after");
        assert!(matches!(&doc.blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_tabs_expand_for_indentation() {
        let doc = parse("- a\n\t- b");
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(list.items.len(), 1);
        assert!(list.items[0].nested.is_some());
    }

    #[test]
    fn test_empty_input() {
        let doc = parse("");
        assert!(doc.blocks.is_empty());
        assert!(doc.footnotes.is_empty());
    }

    #[test]
    fn test_title_extraction() {
        let doc = parse("intro\n\n## Only H2");
        assert_eq!(doc.title(), Some("Only H2"));
        assert_eq!(parse("no headings at all").title(), None);
    }

    #[test]
    fn test_document_order_preserved() {
        let doc = parse("# H\n\npara\n\n```\ncode\n```\n\n- item");
        let kinds: Vec<&str> = doc
            .blocks
            .iter()
            .map(|b| match b {
                Block::Heading { .. } => "heading",
                Block::Paragraph { .. } => "paragraph",
                Block::CodeBlock { .. } => "code",
                Block::List(_) => "list",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["heading", "paragraph", "code", "list"]);
    }
}
