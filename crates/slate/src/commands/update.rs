//! `slate update` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use slate_renderer::Format;

use crate::build::{BuildRequest, build_page};
use crate::error::CliError;
use crate::meta::BuildMetadata;
use crate::output::Output;

/// Arguments for the update command.
#[derive(Args)]
pub(crate) struct UpdateArgs {
    /// Existing file to update.
    output: PathBuf,

    /// Input markdown file (optional when the output carries build metadata).
    input: Option<PathBuf>,

    /// Template path (required for HTML output).
    #[arg(short = 'T', long)]
    template: Option<PathBuf>,

    /// Brief description of the page (metadata).
    #[arg(short, long)]
    description: Option<String>,
}

impl UpdateArgs {
    /// Execute the update command.
    ///
    /// # Errors
    ///
    /// Returns an error if the output does not exist, the source cannot
    /// be determined, or the build fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        if !self.output.exists() {
            return Err(CliError::Validation(format!(
                "output file '{}' does not exist; use 'page' to create a new file",
                self.output.display()
            )));
        }

        let (input, template, creation) = match self.input {
            Some(input) => (input, self.template, None),
            None => {
                let text = std::fs::read_to_string(&self.output)?;
                let Some(meta) = BuildMetadata::from_document(&text) else {
                    return Err(CliError::Validation(
                        "no build metadata found in output file; specify the input file"
                            .to_owned(),
                    ));
                };
                // An explicit -T flag still wins over the recorded template.
                let template = self
                    .template
                    .unwrap_or_else(|| PathBuf::from(&meta.template));
                output.info(&format!(
                    "Smart update: detected source '{}' and template '{}'",
                    meta.source,
                    template.display()
                ));
                (
                    PathBuf::from(meta.source),
                    Some(template),
                    Some((meta.creation_date, meta.creation_time)),
                )
            }
        };

        if !input.exists() {
            return Err(CliError::Validation(format!(
                "input file '{}' does not exist",
                input.display()
            )));
        }

        let format = format_for(&self.output, output);
        build_page(
            BuildRequest {
                input,
                output: self.output,
                format,
                title: None,
                description: self.description,
                template,
                creation,
            },
            output,
        )
    }
}

/// Output format chosen by the output file's extension.
fn format_for(path: &Path, output: &Output) -> Format {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => Format::Html,
        Some("gmi") => Format::Gemtext,
        Some("txt") => Format::Gopher,
        _ => {
            output.warning(&format!(
                "unknown output extension for '{}', defaulting to HTML",
                path.display()
            ));
            Format::Html
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_for_known_extensions() {
        let output = Output::new();
        assert_eq!(format_for(Path::new("a.html"), &output), Format::Html);
        assert_eq!(format_for(Path::new("a.HTM"), &output), Format::Html);
        assert_eq!(format_for(Path::new("a.gmi"), &output), Format::Gemtext);
        assert_eq!(format_for(Path::new("a.txt"), &output), Format::Gopher);
    }

    #[test]
    fn test_format_for_unknown_extension_defaults_to_html() {
        assert_eq!(format_for(Path::new("a.xyz"), &Output::new()), Format::Html);
    }

    #[test]
    fn test_update_round_trip_recovers_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("post.md");
        let template = dir.path().join("base.html");
        let out_path = dir.path().join("post.html");
        std::fs::write(&input, "# First\n").unwrap();
        std::fs::write(&template, "{{content}}").unwrap();

        let term = Output::new();
        build_page(
            BuildRequest {
                input: input.clone(),
                output: out_path.clone(),
                format: Format::Html,
                title: None,
                description: None,
                template: Some(template),
                creation: None,
            },
            &term,
        )
        .unwrap();

        // Change the source and update without naming it.
        std::fs::write(&input, "# Second\n").unwrap();
        let args = UpdateArgs {
            output: out_path.clone(),
            input: None,
            template: None,
            description: None,
        };
        args.execute(&term).unwrap();

        let html = std::fs::read_to_string(&out_path).unwrap();
        assert!(html.contains(">Second</h1>"));
        assert!(BuildMetadata::from_document(&html).is_some());
    }

    #[test]
    fn test_update_missing_output_is_error() {
        let args = UpdateArgs {
            output: PathBuf::from("/nonexistent/out.html"),
            input: None,
            template: None,
            description: None,
        };
        assert!(matches!(
            args.execute(&Output::new()),
            Err(CliError::Validation(_))
        ));
    }

    #[test]
    fn test_update_without_metadata_requires_input() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("plain.html");
        std::fs::write(&out_path, "<html>no metadata</html>").unwrap();

        let args = UpdateArgs {
            output: out_path,
            input: None,
            template: None,
            description: None,
        };
        assert!(matches!(
            args.execute(&Output::new()),
            Err(CliError::Validation(_))
        ));
    }
}
