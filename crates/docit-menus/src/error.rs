//! Error types for menu construction and rendering.

use std::error::Error as StdError;

/// Boxed error returned by hook listeners.
pub type ListenerError = Box<dyn StdError + Send + Sync + 'static>;

/// A hook listener failed.
#[derive(Debug, thiserror::Error)]
#[error("Hook '{event}' failed: {source}")]
pub struct HookError {
    /// Event name the failing listener was registered for.
    pub event: String,
    /// Error returned by the listener.
    #[source]
    pub source: ListenerError,
}

/// Error from menu tree operations.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// A lifecycle hook aborted construction.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// Attaching the child would make it an ancestor of itself.
    #[error("Cannot attach '{child}' under '{parent}': would create a cycle")]
    Cycle { parent: String, child: String },

    /// The child already has a parent.
    #[error("Menu item '{child}' is already attached")]
    AlreadyAttached { child: String },

    /// Handle does not belong to this menu.
    #[error("Unknown menu node handle")]
    UnknownHandle,
}

/// Error from the templating service.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// No template is registered under the view name.
    #[error("View not found: {0}")]
    NotFound(String),

    /// Template failed to compile or render.
    #[error("Template error: {0}")]
    Template(String),
}

/// Error while loading a menu definition.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("Invalid menu definition: {0}")]
    Parse(String),

    /// An item claims the id reserved for the root node.
    #[error("Menu item '{name}' uses the reserved id '{id}'")]
    ReservedId { name: String, id: String },
}

impl From<serde_yaml::Error> for DefinitionError {
    fn from(e: serde_yaml::Error) -> Self {
        DefinitionError::Parse(e.to_string())
    }
}
