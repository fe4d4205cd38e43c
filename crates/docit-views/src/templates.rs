//! minijinja-backed [`ViewFactory`].
//!
//! View names take the form `namespace::path`. Lookup strips the namespace
//! and tries `<dir>/<path>.html` in each configured directory, in order.
//! Unmatched names fall back to the built-in templates.

use std::path::{Component, Path, PathBuf};

use docit_menus::{DEFAULT_MENU_VIEW, ViewError, ViewFactory};
use minijinja::{AutoEscape, Environment, ErrorKind, Output, State, UndefinedBehavior};
use serde_json::Value;

/// View name of the project/version switcher partial.
pub const HEADER_ACTIONS_VIEW: &str = "docit::partials/header-actions";

/// Built-in templates keyed by view name.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (DEFAULT_MENU_VIEW, include_str!("templates/partials/menu.html")),
    (
        HEADER_ACTIONS_VIEW,
        include_str!("templates/partials/header-actions.html"),
    ),
];

/// Templating service over a minijinja environment.
pub struct TemplateViews {
    env: Environment<'static>,
}

impl TemplateViews {
    /// Create a service with only the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dirs(Vec::new())
    }

    /// Create a service that looks up templates in `dirs` before the built-ins.
    #[must_use]
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_formatter(html_formatter);
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_loader(move |name| load_template(&dirs, name));
        Self { env }
    }
}

impl Default for TemplateViews {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewFactory for TemplateViews {
    fn render(&self, view: &str, context: &Value) -> Result<String, ViewError> {
        tracing::debug!(view, "Rendering view");
        let template = self.env.get_template(view).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                ViewError::NotFound(view.to_owned())
            } else {
                ViewError::Template(e.to_string())
            }
        })?;
        template
            .render(context)
            .map_err(|e| ViewError::Template(e.to_string()))
    }
}

/// Formatter escaping only `& < > " '`, so URLs keep their slashes.
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &minijinja::Value,
) -> Result<(), minijinja::Error> {
    if matches!(state.auto_escape(), AutoEscape::None)
        || value.is_safe()
        || value.is_undefined()
        || value.is_none()
    {
        return minijinja::escape_formatter(out, state, value);
    }

    let text = value.to_string();
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    out.write_str(&escaped).map_err(|e| {
        minijinja::Error::new(ErrorKind::WriteFailure, "failed to write output").with_source(e)
    })
}

/// Resolve a view name to template source.
fn load_template(dirs: &[PathBuf], name: &str) -> Result<Option<String>, minijinja::Error> {
    let relative = name.split_once("::").map_or(name, |(_, path)| path);
    let confined = Path::new(relative)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !confined {
        return Ok(None);
    }

    for dir in dirs {
        if let Some(source) = read_override(dir, relative)? {
            tracing::debug!(view = name, dir = %dir.display(), "Using template override");
            return Ok(Some(source));
        }
    }

    Ok(BUILTIN_TEMPLATES
        .iter()
        .find(|(view, _)| *view == name)
        .map(|(_, source)| (*source).to_owned()))
}

/// Read `<dir>/<relative>.html` if it exists.
fn read_override(dir: &Path, relative: &str) -> Result<Option<String>, minijinja::Error> {
    let path = dir.join(format!("{relative}.html"));
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(&path).map(Some).map_err(|e| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("failed to read template {}", path.display()),
        )
        .with_source(e)
    })
}
