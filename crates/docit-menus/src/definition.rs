//! YAML menu definitions.
//!
//! A definition is a list of items, each with a `name` and optionally an
//! `id`, an `href` or a `document`, an `icon` and nested `children`:
//!
//! ```yaml
//! - name: Getting started
//!   icon: fa fa-book
//!   children:
//!     - name: Installation
//!       document: getting-started/installation
//! - name: GitHub
//!   href: https://github.com/docit/docit
//! ```
//!
//! Applying a definition adds each item to a [`Menu`] depth-first, so
//! parents are always registered before their children.

use std::path::Path;

use serde::Deserialize;

use crate::error::DefinitionError;
use crate::menu::{Menu, MenuItem, ROOT_ID};

/// Meta key holding an item's icon class.
pub const ICON_META: &str = "icon";

/// Routing service that turns document paths into hrefs.
pub trait LinkGenerator {
    /// URL of the page rendering `document`.
    fn document_url(&self, document: &str) -> String;
}

/// [`LinkGenerator`] that joins a base URL and the document path.
#[derive(Clone, Debug)]
pub struct PrefixLinks {
    base_url: String,
}

impl PrefixLinks {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl LinkGenerator for PrefixLinks {
    fn document_url(&self, document: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            document.trim_start_matches('/')
        )
    }
}

/// One entry in a menu definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDefinition {
    /// Display label.
    pub name: String,
    /// Explicit id. Derived from the parent id and name when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Literal link target.
    #[serde(default)]
    pub href: Option<String>,
    /// Document path resolved through a [`LinkGenerator`].
    #[serde(default)]
    pub document: Option<String>,
    /// Icon class stored under `meta["icon"]`.
    #[serde(default)]
    pub icon: Option<String>,
    /// Nested items.
    #[serde(default)]
    pub children: Vec<ItemDefinition>,
}

/// Parsed menu definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MenuDefinition {
    pub items: Vec<ItemDefinition>,
}

impl MenuDefinition {
    /// Parse a definition from YAML.
    ///
    /// Empty content yields an empty definition.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Parse`] if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, DefinitionError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(trimmed)?)
    }

    /// Read and parse a definition file.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Io`] if the file cannot be read and
    /// [`DefinitionError::Parse`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check that no item claims the root id.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::ReservedId`] for the first offending item.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        fn check(items: &[ItemDefinition]) -> Result<(), DefinitionError> {
            for item in items {
                if item.id.as_deref() == Some(ROOT_ID) {
                    return Err(DefinitionError::ReservedId {
                        name: item.name.clone(),
                        id: ROOT_ID.to_owned(),
                    });
                }
                check(&item.children)?;
            }
            Ok(())
        }
        check(&self.items)
    }

    /// Add every item to `menu` under the root node.
    ///
    /// Nothing is added if the definition fails [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::ReservedId`] if an item uses the root id.
    pub fn apply(&self, menu: &mut Menu, links: &dyn LinkGenerator) -> Result<(), DefinitionError> {
        self.validate()?;
        for (position, item) in self.items.iter().enumerate() {
            apply_item(menu, links, item, ROOT_ID, position);
        }
        Ok(())
    }
}

/// Add `item` under `parent` and recurse into its children.
fn apply_item(
    menu: &mut Menu,
    links: &dyn LinkGenerator,
    item: &ItemDefinition,
    parent: &str,
    position: usize,
) {
    let id = item
        .id
        .clone()
        .unwrap_or_else(|| derive_id(parent, &item.name, position));

    let mut entry = MenuItem::new(id.clone(), item.name.clone()).parent(parent);
    if let Some(href) = &item.href {
        entry = entry.attribute("href", href.clone());
    } else if let Some(document) = &item.document {
        entry = entry.attribute("href", links.document_url(document));
    }
    if let Some(icon) = &item.icon {
        entry = entry.meta(ICON_META, icon.clone());
    }
    menu.add(entry);

    for (position, child) in item.children.iter().enumerate() {
        apply_item(menu, links, child, &id, position);
    }
}

/// Derive an id from the parent id and a slug of the name.
///
/// Names without ASCII letters or digits fall back to `item-<n>`, where `n`
/// is the 1-based position among siblings. A top-level slug equal to the
/// root id gets an `-item` suffix.
fn derive_id(parent: &str, name: &str, position: usize) -> String {
    let mut slug = slugify(name);
    if slug.is_empty() {
        slug = format!("item-{}", position + 1);
    }
    if parent != ROOT_ID {
        format!("{parent}/{slug}")
    } else if slug == ROOT_ID {
        format!("{slug}-item")
    } else {
        slug
    }
}

/// Lowercase ASCII slug with runs of other characters collapsed to `-`.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;

    use super::*;
    use crate::hooks::Hooks;

    const DEFINITION: &str = r"
- name: Getting started
  icon: fa fa-book
  children:
    - name: Installation
      document: getting-started/installation
    - name: Configuration
      id: config
      document: /getting-started/configuration
- name: GitHub
  href: https://github.com/docit/docit
";

    fn build(definition: &MenuDefinition) -> Menu {
        let mut menu = Menu::new(&Hooks::new()).unwrap();
        definition
            .apply(&mut menu, &PrefixLinks::new("/docs/1.0/"))
            .unwrap();
        menu
    }

    #[test]
    fn test_from_yaml_parses_nested_items() {
        let definition = MenuDefinition::from_yaml(DEFINITION).unwrap();

        assert_eq!(definition.items.len(), 2);
        assert_eq!(definition.items[0].name, "Getting started");
        assert_eq!(definition.items[0].children.len(), 2);
        assert_eq!(definition.items[0].children[1].id.as_deref(), Some("config"));
    }

    #[test]
    fn test_from_yaml_empty_content() {
        let definition = MenuDefinition::from_yaml("  \n").unwrap();

        assert!(definition.items.is_empty());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let result = MenuDefinition::from_yaml("- name: [unclosed");

        assert!(matches!(result, Err(DefinitionError::Parse(_))));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let result = MenuDefinition::from_yaml("- name: A\n  url: /a\n");

        assert!(matches!(result, Err(DefinitionError::Parse(_))));
    }

    #[test]
    fn test_apply_builds_tree() {
        let definition = MenuDefinition::from_yaml(DEFINITION).unwrap();

        let menu = build(&definition);

        let items = menu.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "getting-started");
        assert_eq!(items[0].children[0].id, "getting-started/installation");
        assert_eq!(items[0].children[1].id, "config");
        assert_eq!(items[1].id, "github");
    }

    #[test]
    fn test_apply_resolves_links() {
        let definition = MenuDefinition::from_yaml(DEFINITION).unwrap();

        let menu = build(&definition);

        assert_eq!(
            menu.get("getting-started/installation")
                .unwrap()
                .attribute("href"),
            Some("/docs/1.0/getting-started/installation")
        );
        assert_eq!(
            menu.get("config").unwrap().attribute("href"),
            Some("/docs/1.0/getting-started/configuration")
        );
        assert_eq!(
            menu.get("github").unwrap().attribute("href"),
            Some("https://github.com/docit/docit")
        );
        assert!(!menu.get("getting-started").unwrap().has_attribute("href"));
    }

    #[test]
    fn test_apply_sets_icon_and_parent_meta() {
        let definition = MenuDefinition::from_yaml(DEFINITION).unwrap();

        let menu = build(&definition);

        let section = menu.get("getting-started").unwrap();
        assert_eq!(section.meta(ICON_META), Some(&Value::from("fa fa-book")));
        assert_eq!(
            menu.get("config").unwrap().meta("data-parent"),
            Some(&Value::from("getting-started"))
        );
    }

    #[test]
    fn test_apply_breadcrumb_by_href() {
        let definition = MenuDefinition::from_yaml(DEFINITION).unwrap();
        let menu = build(&definition);

        let trail: Vec<_> = menu
            .breadcrumb_to_href("/docs/1.0/getting-started/configuration")
            .iter()
            .map(|n| n.value().to_owned())
            .collect();

        assert_eq!(trail, vec!["root", "Getting started", "Configuration"]);
    }

    #[test]
    fn test_apply_item_named_root_keeps_real_root() {
        let definition =
            MenuDefinition::from_yaml("- name: Root\n- name: Guide\n- name: API\n").unwrap();

        let menu = build(&definition);

        let root = menu.root().unwrap();
        assert_eq!(root.value(), "root");
        assert!(root.parent().is_none());
        let top: Vec<_> = menu.items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(top, vec!["root-item", "guide", "api"]);
        assert_eq!(menu.get("root-item").unwrap().value(), "Root");
    }

    #[test]
    fn test_apply_rejects_explicit_root_id() {
        let definition =
            MenuDefinition::from_yaml("- name: Guide\n- name: Home\n  id: root\n").unwrap();
        let mut menu = Menu::new(&Hooks::new()).unwrap();

        let result = definition.apply(&mut menu, &PrefixLinks::new("/"));

        assert!(matches!(
            result,
            Err(DefinitionError::ReservedId { ref name, .. }) if name == "Home"
        ));
        assert_eq!(menu.len(), 1);
    }

    #[test]
    fn test_validate_checks_nested_items() {
        let definition = MenuDefinition::from_yaml(
            "- name: Guide\n  children:\n    - name: Home\n      id: root\n",
        )
        .unwrap();

        assert!(matches!(
            definition.validate(),
            Err(DefinitionError::ReservedId { .. })
        ));
    }

    #[test]
    fn test_apply_non_ascii_names_get_positional_ids() {
        let definition = MenuDefinition::from_yaml(
            "- name: 入门\n  children:\n    - name: 安装\n- name: 参考\n",
        )
        .unwrap();

        let menu = build(&definition);

        assert_eq!(menu.len(), 4);
        assert_eq!(menu.get("item-1").unwrap().value(), "入门");
        assert_eq!(menu.get("item-1/item-1").unwrap().value(), "安装");
        assert_eq!(menu.get("item-2").unwrap().value(), "参考");
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.yml");
        fs::write(&path, DEFINITION).unwrap();

        let definition = MenuDefinition::load(&path).unwrap();

        assert_eq!(definition.items.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = MenuDefinition::load(&dir.path().join("missing.yml"));

        assert!(matches!(result, Err(DefinitionError::Io(_))));
    }

    #[test]
    fn test_prefix_links_joins_without_double_slash() {
        let links = PrefixLinks::new("https://docs.example.com/");

        assert_eq!(
            links.document_url("/guide/intro"),
            "https://docs.example.com/guide/intro"
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started!"), "getting-started");
        assert_eq!(slugify("  API / Reference  "), "api-reference");
        assert_eq!(slugify("v2.0"), "v2-0");
        assert_eq!(slugify("参考"), "");
    }

    #[test]
    fn test_derive_id() {
        assert_eq!(derive_id(ROOT_ID, "Guide", 0), "guide");
        assert_eq!(derive_id("guide", "Install", 2), "guide/install");
        assert_eq!(derive_id(ROOT_ID, "Root", 0), "root-item");
        assert_eq!(derive_id("guide", "Root", 0), "guide/root");
        assert_eq!(derive_id(ROOT_ID, "?", 4), "item-5");
    }
}
