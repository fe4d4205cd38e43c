//! Menu node data.

use std::collections::BTreeMap;

use serde_json::Value;

/// Handle to a node stored in a [`Menu`](crate::Menu).
///
/// Handles are arena indices and are only meaningful for the menu
/// that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) usize);

/// A single navigation entry.
///
/// Nodes are owned by their menu. Parent and children are stored as
/// handles, so traversal goes through [`Menu`](crate::Menu).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    handle: NodeHandle,
    id: String,
    value: String,
    meta: BTreeMap<String, Value>,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
}

impl Node {
    pub(crate) fn new(
        handle: NodeHandle,
        id: String,
        value: String,
        meta: BTreeMap<String, Value>,
        attributes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            handle,
            id,
            value,
            meta,
            attributes,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Handle of this node in its menu.
    #[must_use]
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Unique id within the menu.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parent handle, `None` for the root and for orphans.
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Child handles in display order.
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    #[must_use]
    pub fn has_meta(&self, key: &str) -> bool {
        self.meta.contains_key(key)
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.meta.insert(key.into(), value.into());
    }

    /// All metadata entries.
    #[must_use]
    pub fn meta_map(&self) -> &BTreeMap<String, Value> {
        &self.meta
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// All attributes.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub(crate) fn set_parent(&mut self, parent: NodeHandle) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_child(&mut self, child: NodeHandle) {
        self.children.push(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Node {
        Node::new(
            NodeHandle(0),
            id.to_owned(),
            id.to_uppercase(),
            BTreeMap::new(),
            BTreeMap::new(),
        )
    }

    #[test]
    fn test_new_node_has_no_parent_or_children() {
        let node = node("docs");

        assert_eq!(node.id(), "docs");
        assert_eq!(node.value(), "DOCS");
        assert!(node.parent().is_none());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_meta_roundtrip() {
        let mut node = node("docs");
        assert!(!node.has_meta("icon"));

        node.set_meta("icon", "fa fa-book");
        node.set_meta("weight", 3);

        assert!(node.has_meta("icon"));
        assert_eq!(node.meta("icon"), Some(&Value::from("fa fa-book")));
        assert_eq!(node.meta("weight"), Some(&Value::from(3)));
        assert_eq!(node.meta("missing"), None);
    }

    #[test]
    fn test_attribute_roundtrip() {
        let mut node = node("docs");
        assert!(!node.has_attribute("href"));

        node.set_attribute("href", "/docs");

        assert!(node.has_attribute("href"));
        assert_eq!(node.attribute("href"), Some("/docs"));
        assert_eq!(node.attribute("class"), None);
    }

    #[test]
    fn test_set_attribute_overwrites() {
        let mut node = node("docs");
        node.set_attribute("href", "/old");

        node.set_attribute("href", "/new");

        assert_eq!(node.attribute("href"), Some("/new"));
        assert_eq!(node.attributes().len(), 1);
    }
}
