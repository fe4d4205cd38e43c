//! Menu tree, breadcrumbs and lifecycle hooks for Docit.
//!
//! This crate provides:
//! - [`Menu`]: navigation tree with id lookup, breadcrumbs and href search
//! - [`Hooks`]: `menu:ready` / `menu:done` extension points
//! - [`ViewFactory`]: seam to the templating service used by [`Menu::render`]
//! - [`MenuDefinition`]: YAML menu definitions
//!
//! # Quick Start
//!
//! ```
//! use docit_menus::{Hooks, Menu, MenuItem};
//!
//! let mut menu = Menu::new(&Hooks::new()).unwrap();
//! menu.add(MenuItem::new("docs", "Docs").attribute("href", "/docs"));
//! let install = menu.add(
//!     MenuItem::new("install", "Install")
//!         .parent("docs")
//!         .attribute("href", "/docs/install"),
//! );
//!
//! let trail: Vec<_> = menu.breadcrumb_to(install).iter().map(|n| n.id()).collect();
//! assert_eq!(trail, ["root", "docs", "install"]);
//! assert_eq!(menu.find_item_by_href("/docs").unwrap().id(), "docs");
//! ```

mod definition;
mod error;
mod hooks;
mod menu;
mod node;
mod view;

pub use definition::{ICON_META, ItemDefinition, LinkGenerator, MenuDefinition, PrefixLinks};
pub use error::{DefinitionError, HookError, ListenerError, MenuError, ViewError};
pub use hooks::{Hooks, MENU_DONE, MENU_READY};
pub use menu::{DATA_PARENT, Menu, MenuItem, ROOT_ID};
pub use node::{Node, NodeHandle};
pub use view::{DEFAULT_MENU_VIEW, ItemView, ViewFactory};
