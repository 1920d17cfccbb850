//! CLI error types.

use slate_frontmatter::FrontmatterError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("{0}")]
    Metadata(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
