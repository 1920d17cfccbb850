//! Heading slug generation.

use std::collections::HashMap;

/// Derive a URL-safe slug from heading text.
///
/// Lower-cases, keeps alphanumerics, and collapses everything else into
/// single hyphens. Deterministic: the same text always yields the same
/// slug.
///
/// ```
/// use slate_parser::slugify;
///
/// assert_eq!(slugify("Section Title"), "section-title");
/// assert_eq!(slugify("Install `npm`!"), "install-npm");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

/// Tracks slugs handed out within one document and disambiguates
/// duplicates with a numeric suffix (`faq`, `faq-1`, `faq-2`).
#[derive(Debug, Default)]
pub struct SlugCounter {
    seen: HashMap<String, usize>,
}

impl SlugCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a unique id for the given heading text.
    pub fn assign(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}
