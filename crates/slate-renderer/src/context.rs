//! Render context supplied by the caller.

/// Everything a render call may draw on besides the document itself.
///
/// Absent values are empty strings, never failures. The blog fields are
/// parallel arrays of equal length, one entry per listed post; they are
/// exposed to templates as newline-joined strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderContext {
    /// Rendered body, available to templates as `{{content}}`.
    pub content: String,
    pub title: String,
    pub description: String,
    pub creation_date: String,
    pub creation_time: String,
    pub modify_date: String,
    pub modify_time: String,
    /// Generator version string (e.g. `v0.2.5`).
    pub version: String,
    /// Pre-built table-of-contents markup for `{{toc}}`.
    pub toc: String,
    pub nav_header: String,
    pub nav_category: String,
    pub category_name: String,
    pub breadcrumbs: String,
    pub blog_titles: Vec<String>,
    pub blog_descriptions: Vec<String>,
    pub blog_views: Vec<String>,
    pub blog_contents: Vec<String>,
    /// Gophermap menu host.
    pub host: String,
    /// Gophermap menu port.
    pub port: u16,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            content: String::new(),
            title: String::new(),
            description: String::new(),
            creation_date: String::new(),
            creation_time: String::new(),
            modify_date: String::new(),
            modify_time: String::new(),
            version: String::new(),
            toc: String::new(),
            nav_header: String::new(),
            nav_category: String::new(),
            category_name: String::new(),
            breadcrumbs: String::new(),
            blog_titles: Vec::new(),
            blog_descriptions: Vec::new(),
            blog_views: Vec::new(),
            blog_contents: Vec::new(),
            host: "localhost".to_owned(),
            port: 70,
        }
    }
}

impl RenderContext {
    /// Creation date and time joined with a space, skipping empty parts.
    #[must_use]
    pub fn datetime(&self) -> String {
        let parts: Vec<&str> = [self.creation_date.as_str(), self.creation_time.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        parts.join(" ")
    }
}
