//! Project and version switcher shown in the page header.

use docit_menus::{ViewError, ViewFactory};
use serde::Serialize;

use crate::templates::HEADER_ACTIONS_VIEW;

/// A labelled link in a switcher dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SwitcherEntry {
    pub label: String,
    pub url: String,
}

/// One dropdown: the current selection plus the available entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Switcher {
    /// Label shown on the toggle.
    pub current: String,
    /// Entries in insertion order.
    pub entries: Vec<SwitcherEntry>,
}

impl Switcher {
    fn new<L, U>(current: impl Into<String>, entries: impl IntoIterator<Item = (L, U)>) -> Self
    where
        L: Into<String>,
        U: Into<String>,
    {
        Self {
            current: current.into(),
            entries: entries
                .into_iter()
                .map(|(label, url)| SwitcherEntry {
                    label: label.into(),
                    url: url.into(),
                })
                .collect(),
        }
    }
}

/// Data for the header actions partial.
///
/// Either dropdown is omitted from the output when unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HeaderActions {
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<Switcher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<Switcher>,
}

impl HeaderActions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project dropdown from display name → URL pairs.
    #[must_use]
    pub fn projects<L, U>(
        mut self,
        current: impl Into<String>,
        projects: impl IntoIterator<Item = (L, U)>,
    ) -> Self
    where
        L: Into<String>,
        U: Into<String>,
    {
        self.project = Some(Switcher::new(current, projects));
        self
    }

    /// Set the version dropdown from ref → URL pairs.
    #[must_use]
    pub fn versions<L, U>(
        mut self,
        current: impl Into<String>,
        refs: impl IntoIterator<Item = (L, U)>,
    ) -> Self
    where
        L: Into<String>,
        U: Into<String>,
    {
        self.version = Some(Switcher::new(current, refs));
        self
    }

    #[must_use]
    pub fn project(&self) -> Option<&Switcher> {
        self.project.as_ref()
    }

    #[must_use]
    pub fn version(&self) -> Option<&Switcher> {
        self.version.as_ref()
    }

    /// Render the `docit::partials/header-actions` view.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Template`] if the context cannot be serialized
    /// and propagates the templating service's error unchanged.
    pub fn render(&self, views: &dyn ViewFactory) -> Result<String, ViewError> {
        let context =
            serde_json::to_value(self).map_err(|e| ViewError::Template(e.to_string()))?;
        views.render(HEADER_ACTIONS_VIEW, &context)
    }
}
