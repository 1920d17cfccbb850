//! Template variable registry.
//!
//! A fixed name-to-resolver map built once at startup. Substitution is
//! a single pass over the rendered body or template text: each
//! `{{name}}` occurrence is replaced by its resolver's output; unknown
//! names are left verbatim so authors notice typos. Resolver output is
//! never re-scanned, preventing substitution loops.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::context::RenderContext;

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_-]+)\}\}").unwrap());

/// Resolves one variable against the render context.
pub type VariableResolver = fn(&RenderContext) -> String;

/// Immutable name-to-resolver map.
#[derive(Clone, Debug)]
pub struct VariableRegistry {
    resolvers: HashMap<&'static str, VariableResolver>,
}

impl Default for VariableRegistry {
    fn default() -> Self {
        let mut registry = Self {
            resolvers: HashMap::new(),
        };
        registry.register("content", |c| c.content.clone());
        registry.register("title", |c| c.title.clone());
        registry.register("description", |c| c.description.clone());
        registry.register("creation_date", |c| c.creation_date.clone());
        registry.register("creation_time", |c| c.creation_time.clone());
        registry.register("modify_date", |c| c.modify_date.clone());
        registry.register("modify_time", |c| c.modify_time.clone());
        registry.register("datetime", RenderContext::datetime);
        registry.register("version", |c| c.version.clone());
        registry.register("toc", |c| c.toc.clone());
        registry.register("nav_header", |c| c.nav_header.clone());
        registry.register("nav_category", |c| c.nav_category.clone());
        registry.register("category_name", |c| c.category_name.clone());
        registry.register("breadcrumbs", |c| c.breadcrumbs.clone());
        registry.register("blog_title", |c| c.blog_titles.join("\n"));
        registry.register("blog_description", |c| c.blog_descriptions.join("\n"));
        registry.register("blog_view", |c| c.blog_views.join("\n"));
        registry.register("blog_content", |c| c.blog_contents.join("\n"));
        registry
    }
}

impl VariableRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &'static str, resolver: VariableResolver) {
        self.resolvers.insert(name, resolver);
    }

    /// Replace every known `{{name}}` in one non-recursive pass.
    #[must_use]
    pub fn substitute(&self, text: &str, ctx: &RenderContext) -> String {
        VAR_RE
            .replace_all(text, |c: &Captures<'_>| match self.resolvers.get(&c[1]) {
                Some(resolver) => resolver(ctx),
                None => c[0].to_owned(),
            })
            .into_owned()
    }
}
