//! Shared build pipeline for the `page` and `update` commands.
//!
//! Reads the markdown source, splits frontmatter, parses the document,
//! renders it through the backend for the requested format, applies
//! variable substitution and writes the result. HTML output is wrapped
//! in a template and carries a trailing build-metadata comment.

use std::path::{Path, PathBuf};

use chrono::Local;
use slate_renderer::{
    DocumentRenderer, Format, GemtextBackend, GopherBackend, HtmlBackend, RenderContext,
    VariableRegistry, toc_html,
};

use crate::error::CliError;
use crate::meta::BuildMetadata;
use crate::output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One page build, assembled by the command layer.
pub(crate) struct BuildRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: Format,
    pub title: Option<String>,
    pub description: Option<String>,
    pub template: Option<PathBuf>,
    /// Creation timestamps recovered from an earlier build, if any.
    pub creation: Option<(String, String)>,
}

/// Build one page and write it to the requested output path.
pub(crate) fn build_page(req: BuildRequest, output: &Output) -> Result<(), CliError> {
    let markdown = std::fs::read_to_string(&req.input)?;
    let (frontmatter, content) = slate_frontmatter::extract(&markdown)?;

    let problems = frontmatter.validate(&req.input.display().to_string());
    if !problems.is_empty() {
        for problem in &problems {
            output.error(&format!("ERROR: {problem}"));
        }
        return Err(CliError::Validation(
            "frontmatter validation failed".to_owned(),
        ));
    }

    // Frontmatter takes precedence over command-line flags.
    let title = frontmatter.title.clone().or(req.title);
    let description = frontmatter
        .description
        .clone()
        .or(req.description)
        .unwrap_or_default();
    let template = frontmatter
        .template
        .clone()
        .map(PathBuf::from)
        .or(req.template);

    let doc = slate_parser::parse(content);
    tracing::debug!(blocks = doc.blocks.len(), "parsed {}", req.input.display());

    let title = title
        .or_else(|| doc.title().map(str::to_owned))
        .unwrap_or_else(|| "Untitled".to_owned());

    let now = Local::now();
    let modify_date = now.format("%d/%m/%Y").to_string();
    let modify_time = now.format("%H:%M").to_string();
    let (creation_date, creation_time) = req
        .creation
        .unwrap_or_else(|| (modify_date.clone(), modify_time.clone()));

    let mut ctx = RenderContext {
        title,
        description,
        creation_date,
        creation_time,
        modify_date,
        modify_time,
        version: format!("v{VERSION}"),
        ..RenderContext::default()
    };

    let vars = VariableRegistry::default();
    let rendered = match req.format {
        Format::Html => {
            let Some(template) = template else {
                return Err(CliError::Validation(
                    "HTML output requires a template via -T/--template".to_owned(),
                ));
            };
            let template_text = std::fs::read_to_string(&template)?;

            ctx.toc = toc_html(&doc.blocks);
            let body = DocumentRenderer::<HtmlBackend>::new().render(&doc, &ctx);
            ctx.content = vars.substitute(&body, &ctx);
            let html = vars.substitute(&template_text, &ctx);

            let metadata = BuildMetadata {
                source: canonical_display(&req.input),
                template: canonical_display(&template),
                creation_date: ctx.creation_date.clone(),
                creation_time: ctx.creation_time.clone(),
            };
            format!("{}\n{}\n", html.trim_end(), metadata.comment()?)
        }
        Format::Gemtext => {
            let body = DocumentRenderer::<GemtextBackend>::new().render(&doc, &ctx);
            vars.substitute(&body, &ctx)
        }
        Format::Gopher => {
            let body = DocumentRenderer::<GopherBackend>::new().render(&doc, &ctx);
            vars.substitute(&body, &ctx)
        }
    };

    save_text(&rendered, &req.output)?;
    output.success(&format!(
        "{} output saved at: {}",
        req.format.name().to_uppercase(),
        req.output.display()
    ));
    Ok(())
}

/// Absolute path when resolvable, the given path otherwise.
fn canonical_display(path: &Path) -> String {
    path.canonicalize()
        .map_or_else(|_| path.display().to_string(), |p| p.display().to_string())
}

fn save_text(text: &str, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(dir: &Path, format: Format, template: Option<PathBuf>) -> BuildRequest {
        BuildRequest {
            input: dir.join("post.md"),
            output: dir.join(format!("out.{}", format.page_extension())),
            format,
            title: None,
            description: None,
            template,
            creation: None,
        }
    }

    #[test]
    fn test_html_build_with_template_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("post.md"), "# Hello\n\nWorld.\n").unwrap();
        std::fs::write(
            dir.path().join("base.html"),
            "<html><title>{{title}}</title>{{content}}</html>\n",
        )
        .unwrap();

        let req = request(dir.path(), Format::Html, Some(dir.path().join("base.html")));
        let out_path = req.output.clone();
        build_page(req, &Output::new()).unwrap();

        let html = std::fs::read_to_string(out_path).unwrap();
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains("<h1 class='content-h1' id='hello'>Hello</h1>"));
        assert!(BuildMetadata::from_document(&html).is_some());
    }

    #[test]
    fn test_html_without_template_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("post.md"), "# Hello\n").unwrap();

        let err = build_page(request(dir.path(), Format::Html, None), &Output::new());
        assert!(matches!(err, Err(CliError::Validation(_))));
    }

    #[test]
    fn test_gemtext_build_needs_no_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("post.md"), "# Hello\n\nWorld.\n").unwrap();

        let req = request(dir.path(), Format::Gemtext, None);
        let out_path = req.output.clone();
        build_page(req, &Output::new()).unwrap();

        let gemtext = std::fs::read_to_string(out_path).unwrap();
        assert!(gemtext.contains("# Hello"));
        assert!(gemtext.contains("World."));
    }

    #[test]
    fn test_frontmatter_title_wins_over_heading() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("post.md"),
            "---\ntitle: Override\n---\n# Heading\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("base.html"), "{{title}}|{{content}}").unwrap();

        let req = request(dir.path(), Format::Html, Some(dir.path().join("base.html")));
        let out_path = req.output.clone();
        build_page(req, &Output::new()).unwrap();

        let html = std::fs::read_to_string(out_path).unwrap();
        assert!(html.starts_with("Override|"));
    }

    #[test]
    fn test_invalid_frontmatter_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("post.md"), "---\ntype: blog\n---\nbody\n").unwrap();

        let err = build_page(request(dir.path(), Format::Gemtext, None), &Output::new());
        assert!(matches!(err, Err(CliError::Validation(_))));
    }
}
