//! Named lifecycle hooks.
//!
//! [`Hooks`] is a small event bus keyed by event name. Listeners run
//! synchronously, in registration order, and receive the target mutably.
//! The first failing listener stops dispatch and its error is returned.
//!
//! # Example
//!
//! ```
//! use docit_menus::{Hooks, Menu, MenuItem, MENU_DONE};
//!
//! let mut hooks = Hooks::new();
//! hooks.on(MENU_DONE, |menu: &mut Menu| {
//!     menu.add(MenuItem::new("home", "Home").attribute("href", "/"));
//!     Ok(())
//! });
//!
//! let menu = Menu::new(&hooks).unwrap();
//! assert!(menu.has("home"));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::error::{HookError, ListenerError};

/// Event emitted before the root node is inserted.
pub const MENU_READY: &str = "menu:ready";

/// Event emitted after the root node is inserted.
pub const MENU_DONE: &str = "menu:done";

type Listener<T> = Box<dyn Fn(&mut T) -> Result<(), ListenerError> + Send + Sync>;

/// Event bus mapping event names to ordered listener lists.
pub struct Hooks<T> {
    listeners: HashMap<String, Vec<Listener<T>>>,
}

impl<T> Hooks<T> {
    /// Create an empty hook registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Register a listener for `event`.
    ///
    /// Listeners for the same event run in the order they were registered.
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> &mut Self
    where
        F: Fn(&mut T) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.listeners
            .entry(event.into())
            .or_default()
            .push(Box::new(listener));
        self
    }

    /// Run all listeners registered for `event` against `target`.
    ///
    /// # Errors
    ///
    /// Returns the first listener error, wrapped with the event name.
    /// Remaining listeners are not invoked.
    pub fn run(&self, event: &str, target: &mut T) -> Result<(), HookError> {
        let Some(listeners) = self.listeners.get(event) else {
            return Ok(());
        };

        tracing::debug!(event, count = listeners.len(), "Running hooks");
        for listener in listeners {
            listener(target).map_err(|source| HookError {
                event: event.to_owned(),
                source,
            })?;
        }
        Ok(())
    }
}

impl<T> Default for Hooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Hooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<_> = self
            .listeners
            .iter()
            .map(|(event, l)| (event.as_str(), l.len()))
            .collect();
        events.sort_unstable();
        f.debug_struct("Hooks").field("listeners", &events).finish()
    }
}
