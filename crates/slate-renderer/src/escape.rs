//! HTML entity escaping.

/// Escape the five HTML-sensitive characters.
///
/// Applied to all text entering HTML output except markup already
/// produced by the inline tokenizer. The text formats emit raw text and
/// never escape.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
