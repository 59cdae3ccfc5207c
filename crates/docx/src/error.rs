//! CLI error types.

use docx_config::ConfigError;
use docx_content::{NavigationError, ResolveError};
use docx_search::SearchError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("Found {0} slug collision(s)")]
    Collisions(usize),
}
