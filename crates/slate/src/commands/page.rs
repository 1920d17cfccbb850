//! `slate page` command implementation.

use std::path::PathBuf;

use clap::Args;
use slate_renderer::Format;

use crate::build::{BuildRequest, build_page};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Input markdown file.
    input: PathBuf,

    /// Output path and filename (e.g. pages/post.html).
    output: PathBuf,

    /// Output format: html (default), gemini, gopher.
    #[arg(short, long, default_value = "html")]
    format: String,

    /// Title override (instead of the first heading in the markdown).
    #[arg(short, long)]
    title: Option<String>,

    /// Brief description of the page (metadata).
    #[arg(short, long)]
    description: Option<String>,

    /// Template path (required for HTML output).
    #[arg(short = 'T', long)]
    template: Option<PathBuf>,
}

impl PageArgs {
    /// Execute the page command.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let format = Format::from_name(&self.format)
            .ok_or_else(|| CliError::Validation(format!("unsupported format: {}", self.format)))?;

        build_page(
            BuildRequest {
                input: self.input,
                output: self.output,
                format,
                title: self.title,
                description: self.description,
                template: self.template,
                creation: None,
            },
            output,
        )
    }
}
