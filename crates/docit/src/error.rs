//! CLI error types.

use docit_config::ConfigError;
use docit_menus::{DefinitionError, MenuError, ViewError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Definition(#[from] DefinitionError),

    #[error("{0}")]
    Menu(#[from] MenuError),

    #[error("{0}")]
    View(#[from] ViewError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
