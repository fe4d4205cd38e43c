//! Template rendering and view partials for Docit.
//!
//! - [`TemplateViews`]: minijinja implementation of
//!   [`ViewFactory`](docit_menus::ViewFactory) with built-in menu and
//!   header templates, overridable from view directories
//! - [`HeaderActions`]: project/version switcher partial

mod switcher;
mod templates;

pub use switcher::{HeaderActions, Switcher, SwitcherEntry};
pub use templates::{HEADER_ACTIONS_VIEW, TemplateViews};
