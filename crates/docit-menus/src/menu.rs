//! Menu tree container.
//!
//! # Architecture
//!
//! Nodes live in a flat `Vec<Node>` arena and refer to each other through
//! [`NodeHandle`] indices. The id registry maps ids to handles and keeps
//! first-insertion order for scans. This gives:
//! - O(1) id lookups
//! - O(d) breadcrumb building where d is the node depth
//! - no reference cycles between parents and children
//!
//! Re-adding an existing id replaces the registry entry only. The replaced
//! node stays in the arena and in its parent's children.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Value, json};

use crate::error::{MenuError, ViewError};
use crate::hooks::{Hooks, MENU_DONE, MENU_READY};
use crate::node::{Node, NodeHandle};
use crate::view::{DEFAULT_MENU_VIEW, ItemView, ViewFactory};

/// Id of the implicit root node.
pub const ROOT_ID: &str = "root";

/// Meta key stamped with the parent id when a node is attached by [`Menu::add`].
pub const DATA_PARENT: &str = "data-parent";

/// Description of a node to add with [`Menu::add`].
///
/// The parent defaults to the root node.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    id: String,
    value: String,
    parent: Option<String>,
    meta: BTreeMap<String, Value>,
    attributes: BTreeMap<String, String>,
}

impl MenuItem {
    /// Create an item placed under the root node.
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            parent: Some(ROOT_ID.to_owned()),
            meta: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Place the item under `parent`.
    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Register the item without attaching it anywhere.
    #[must_use]
    pub fn detached(mut self) -> Self {
        self.parent = None;
        self
    }

    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Navigation menu tree.
///
/// Construct with [`Menu::new`], populate with [`Menu::add`], then
/// [`render`](Menu::render) or query breadcrumbs.
#[derive(Clone, Debug)]
pub struct Menu {
    view: String,
    nodes: Vec<Node>,
    index: HashMap<String, NodeHandle>,
    order: Vec<String>,
}

impl Menu {
    /// Create a menu using the default view.
    ///
    /// Runs `menu:ready` listeners, inserts the root node, then runs
    /// `menu:done` listeners.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Hook`] if a listener fails.
    pub fn new(hooks: &Hooks<Menu>) -> Result<Self, MenuError> {
        Self::with_view(DEFAULT_MENU_VIEW, hooks)
    }

    /// Create a menu rendered through `view`.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Hook`] if a listener fails.
    pub fn with_view(view: impl Into<String>, hooks: &Hooks<Menu>) -> Result<Self, MenuError> {
        let mut menu = Self {
            view: view.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
            order: Vec::new(),
        };

        hooks.run(MENU_READY, &mut menu)?;
        menu.add(MenuItem::new(ROOT_ID, ROOT_ID).detached());
        hooks.run(MENU_DONE, &mut menu)?;

        Ok(menu)
    }

    /// Add a node and return its handle.
    ///
    /// When the item's parent is registered, the node is appended to the
    /// parent's children and `meta["data-parent"]` is set to the parent id.
    /// An unknown parent leaves the node registered but orphaned.
    /// An existing id is overwritten in the registry.
    pub fn add(&mut self, item: MenuItem) -> NodeHandle {
        let MenuItem {
            id,
            value,
            parent,
            meta,
            attributes,
        } = item;

        let handle = NodeHandle(self.nodes.len());
        self.nodes
            .push(Node::new(handle, id.clone(), value, meta, attributes));

        if let Some(parent_id) = parent {
            if let Some(&parent_handle) = self.index.get(&parent_id) {
                self.nodes[parent_handle.0].push_child(handle);
                let node = &mut self.nodes[handle.0];
                node.set_parent(parent_handle);
                node.set_meta(DATA_PARENT, parent_id);
            } else {
                tracing::debug!(id = %id, parent = %parent_id, "Parent not found, menu item left orphaned");
            }
        }

        if self.index.insert(id.clone(), handle).is_some() {
            tracing::warn!(id = %id, "Menu item id already registered, replacing entry");
        } else {
            self.order.push(id);
        }

        handle
    }

    /// Check whether `id` is registered.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get the node registered under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&h| &self.nodes[h.0])
    }

    /// Get the node registered under `id`, or `default` if absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, id: &str, default: &'a Node) -> &'a Node {
        self.get(id).unwrap_or(default)
    }

    /// Get mutable access to the node registered under `id`.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        let handle = *self.index.get(id)?;
        self.nodes.get_mut(handle.0)
    }

    /// Get a node by handle.
    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle.0)
    }

    /// Get mutable access to a node by handle.
    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle.0)
    }

    /// The root node. Absent only while `menu:ready` listeners run.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.get(ROOT_ID)
    }

    /// Children of `node` in display order.
    #[must_use]
    pub fn children(&self, node: &Node) -> Vec<&Node> {
        node.children()
            .iter()
            .filter_map(|&h| self.nodes.get(h.0))
            .collect()
    }

    /// Registered nodes in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.get(id))
    }

    /// Number of registered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check whether no id is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// View name used by [`render`](Menu::render).
    #[must_use]
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Replace the view name.
    pub fn set_view(&mut self, view: impl Into<String>) -> &mut Self {
        self.view = view.into();
        self
    }

    /// Append `child` to `parent`'s children.
    ///
    /// # Errors
    ///
    /// - [`MenuError::UnknownHandle`] if either handle is not in this menu
    /// - [`MenuError::AlreadyAttached`] if `child` already has a parent or is the root
    /// - [`MenuError::Cycle`] if `child` is `parent` or one of its ancestors
    pub fn add_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<(), MenuError> {
        let (Some(parent_node), Some(child_node)) = (self.node(parent), self.node(child)) else {
            return Err(MenuError::UnknownHandle);
        };

        if child_node.parent().is_some() || self.root().is_some_and(|r| r.handle() == child) {
            return Err(MenuError::AlreadyAttached {
                child: child_node.id().to_owned(),
            });
        }

        let mut current = Some(parent);
        while let Some(h) = current {
            if h == child {
                return Err(MenuError::Cycle {
                    parent: parent_node.id().to_owned(),
                    child: child_node.id().to_owned(),
                });
            }
            current = self.nodes.get(h.0).and_then(Node::parent);
        }

        self.nodes[parent.0].push_child(child);
        self.nodes[child.0].set_parent(parent);
        Ok(())
    }

    /// Chain from the topmost ancestor down to `handle`, inclusive.
    ///
    /// For attached nodes the chain starts at the root. Unknown handles
    /// yield an empty chain.
    #[must_use]
    pub fn ancestors_and_self(&self, handle: NodeHandle) -> Vec<&Node> {
        let mut chain = Vec::new();
        let mut current = self.node(handle);
        while let Some(node) = current {
            chain.push(node);
            current = node.parent().and_then(|h| self.nodes.get(h.0));
        }
        chain.reverse();
        chain
    }

    /// Breadcrumb trail from the root to `handle`, inclusive.
    #[must_use]
    pub fn breadcrumb_to(&self, handle: NodeHandle) -> Vec<&Node> {
        self.ancestors_and_self(handle)
    }

    /// Breadcrumb trail to the first node whose `href` equals `href`.
    ///
    /// Returns an empty trail if no node matches.
    #[must_use]
    pub fn breadcrumb_to_href(&self, href: &str) -> Vec<&Node> {
        self.find_item_by_href(href)
            .map(|node| self.breadcrumb_to(node.handle()))
            .unwrap_or_default()
    }

    /// First node, in registry order, whose `href` attribute equals `href`.
    #[must_use]
    pub fn find_item_by_href(&self, href: &str) -> Option<&Node> {
        self.iter().find(|node| node.attribute("href") == Some(href))
    }

    /// Serializable subtree under the root node.
    #[must_use]
    pub fn items(&self) -> Vec<ItemView> {
        self.root()
            .map(|root| {
                self.children(root)
                    .into_iter()
                    .map(|child| self.build_item_view(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Render the menu through `views` using the configured view name.
    ///
    /// The template receives `menu` (with `view`) and `items` (the
    /// serialized children of the root node).
    ///
    /// # Errors
    ///
    /// Propagates the templating service's error unchanged.
    pub fn render(&self, views: &dyn ViewFactory) -> Result<String, ViewError> {
        let context = json!({
            "menu": { "view": self.view },
            "items": self.items(),
        });
        views.render(&self.view, &context)
    }

    /// Recursively build an [`ItemView`] from a node.
    fn build_item_view(&self, node: &Node) -> ItemView {
        let children = self
            .children(node)
            .into_iter()
            .map(|child| self.build_item_view(child))
            .collect();

        ItemView {
            id: node.id().to_owned(),
            value: node.value().to_owned(),
            meta: node.meta_map().clone(),
            attributes: node.attributes().clone(),
            children,
        }
    }
}
