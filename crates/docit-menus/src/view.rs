//! Rendering seam between the menu tree and a templating service.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ViewError;

/// Default view used by [`Menu::render`](crate::Menu::render).
pub const DEFAULT_MENU_VIEW: &str = "docit::partials/menu";

/// Templating service.
///
/// Given a view name and a JSON object of variables, returns rendered
/// output. Implementations must not depend on anything but their inputs.
pub trait ViewFactory {
    /// Render `view` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotFound`] for unknown views and
    /// [`ViewError::Template`] when rendering fails.
    fn render(&self, view: &str, context: &Value) -> Result<String, ViewError>;
}

impl<T: ViewFactory + ?Sized> ViewFactory for &T {
    fn render(&self, view: &str, context: &Value) -> Result<String, ViewError> {
        (**self).render(view, context)
    }
}

/// Serializable snapshot of a menu node and its subtree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemView {
    /// Node id.
    pub id: String,
    /// Display label.
    pub value: String,
    /// Metadata (includes `data-parent` for attached nodes).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, Value>,
    /// Attributes such as `href`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Child items in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ItemView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_view_serialization_skips_empty_fields() {
        let item = ItemView {
            id: "docs".to_owned(),
            value: "Docs".to_owned(),
            meta: BTreeMap::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        };

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "docs");
        assert_eq!(json["value"], "Docs");
        assert!(json.get("meta").is_none());
        assert!(json.get("attributes").is_none());
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_item_view_serialization_with_children() {
        let child = ItemView {
            id: "install".to_owned(),
            value: "Install".to_owned(),
            meta: BTreeMap::from([("data-parent".to_owned(), Value::from("docs"))]),
            attributes: BTreeMap::from([("href".to_owned(), "/docs/install".to_owned())]),
            children: Vec::new(),
        };
        let item = ItemView {
            id: "docs".to_owned(),
            value: "Docs".to_owned(),
            meta: BTreeMap::new(),
            attributes: BTreeMap::new(),
            children: vec![child],
        };

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["children"][0]["id"], "install");
        assert_eq!(json["children"][0]["meta"]["data-parent"], "docs");
        assert_eq!(json["children"][0]["attributes"]["href"], "/docs/install");
    }
}
