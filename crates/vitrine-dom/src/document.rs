#![forbid(unsafe_code)]

//! Retained document tree.
//!
//! [`Document`] is a small stand-in for the browser DOM: elements with a
//! tag, classes, attributes, inline styles and text content, arranged in a
//! tree rooted at `body`. Widgets write to it; every write is mirrored into
//! the mutation log for the host.
//!
//! # Invariants
//!
//! 1. Node ids are never reused, so a stale id cannot alias a live node.
//! 2. A node has at most one parent, and the parent links form a tree
//!    (appending an ancestor into its own descendant is refused).
//! 3. Removing a node frees its whole subtree; if focus was inside the
//!    subtree it is cleared.
//! 4. Only connected nodes (reachable from `body`) can hold focus.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown node | Id never allocated or already removed | Write is a no-op returning `false`, reads return `None` |
//! | Cycle | Appending an ancestor under its descendant | Refused, returns `false` |
//! | Reparent body | `body` passed as a child | Refused, returns `false` |
//! | Focus detached node | Node not under `body` | Refused, returns `false` |

use std::collections::BTreeMap;

use ahash::AHashMap;
use vitrine_core::NodeId;

use crate::listeners::{KeyListeners, ListenerId};
use crate::mutation::Mutation;

/// An element in the retained tree.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    adopted: bool,
}

impl Element {
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Class list in insertion order.
    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// The retained document.
#[derive(Debug)]
pub struct Document {
    nodes: AHashMap<NodeId, Element>,
    next_id: u32,
    body: NodeId,
    focused: Option<NodeId>,
    key_listeners: KeyListeners,
    log: Vec<Mutation>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: AHashMap::new(),
            next_id: 0,
            body: NodeId::new(0),
            focused: None,
            key_listeners: KeyListeners::new(),
            log: Vec::new(),
        };
        let body = doc.alloc("body", None, true);
        doc.body = body;
        doc.log.push(Mutation::Adopt {
            node: body,
            selector: "body".to_string(),
        });
        doc
    }

    fn alloc(&mut self, tag: &str, parent: Option<NodeId>, adopted: bool) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Element {
                tag: tag.to_string(),
                parent,
                adopted,
                ..Element::default()
            },
        );
        id
    }

    /// The `body` element.
    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Bind a pre-existing host element (e.g. `#modal-root`).
    ///
    /// Adopted nodes count as connected; the host owns their real position.
    pub fn adopt(&mut self, tag: &str, selector: &str) -> NodeId {
        let id = self.alloc(tag, Some(self.body), true);
        if let Some(body) = self.nodes.get_mut(&self.body) {
            body.children.push(id);
        }
        self.log.push(Mutation::Adopt {
            node: id,
            selector: selector.to_string(),
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.alloc(tag, None, false);
        self.log.push(Mutation::Create {
            node: id,
            tag: tag.to_string(),
        });
        id
    }

    // --- Queries ---

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(&node)
    }

    #[inline]
    pub fn exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Number of live nodes, `body` included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(Element::parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(Element::children).unwrap_or(&[])
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(Element::text)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|e| e.attr(name))
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.get(node).and_then(|e| e.style(property))
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|e| e.has_class(class))
    }

    /// Whether `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return self.exists(current);
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether `node` is reachable from `body`.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.body, node)
    }

    /// Descendants of `root` (inclusive) carrying `class`, in tree order.
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let Some(el) = self.get(node) else { continue };
            if el.has_class(class) {
                found.push(node);
            }
            stack.extend(el.children.iter().rev().copied());
        }
        found
    }

    /// First descendant of `root` (inclusive) carrying `class`.
    pub fn first_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.find_by_class(root, class).into_iter().next()
    }

    /// Concatenated text of `root` and its descendants, in tree order.
    pub fn text_content(&self, root: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let Some(el) = self.get(node) else { continue };
            out.push_str(&el.text);
            stack.extend(el.children.iter().rev().copied());
        }
        out
    }

    // --- Tree writes ---

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child == self.body
            || !self.exists(parent)
            || !self.exists(child)
            || self.contains(child, parent)
        {
            return false;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        self.log.push(Mutation::Append { parent, child });
        true
    }

    /// Append several children in order.
    pub fn append_children(&mut self, parent: NodeId, children: &[NodeId]) {
        for child in children {
            self.append_child(parent, *child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = None;
        }
    }

    fn free_subtree(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let Some(el) = self.nodes.remove(&node) {
                stack.extend(el.children);
            }
            if self.focused == Some(node) {
                self.focused = None;
            }
        }
    }

    /// Detach and free `node` with its subtree. `body` cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.body || !self.exists(node) {
            return false;
        }
        self.detach(node);
        self.free_subtree(node);
        self.log.push(Mutation::Remove { node });
        true
    }

    /// Detach and free every child of `node` (`innerHTML = ""`).
    pub fn clear_children(&mut self, node: NodeId) -> bool {
        let Some(el) = self.nodes.get_mut(&node) else {
            return false;
        };
        let children = std::mem::take(&mut el.children);
        for child in children {
            self.free_subtree(child);
        }
        self.log.push(Mutation::ClearChildren { node });
        true
    }

    // --- Element writes ---

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> bool {
        let Some(el) = self.nodes.get_mut(&node) else {
            return false;
        };
        let text = text.into();
        el.text.clone_from(&text);
        self.log.push(Mutation::SetText { node, text });
        true
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) -> bool {
        let Some(el) = self.nodes.get_mut(&node) else {
            return false;
        };
        let value = value.into();
        el.attrs.insert(name.to_string(), value.clone());
        self.log.push(Mutation::SetAttr {
            node,
            name: name.to_string(),
            value,
        });
        true
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> bool {
        let Some(el) = self.nodes.get_mut(&node) else {
            return false;
        };
        if el.attrs.remove(name).is_none() {
            return false;
        }
        self.log.push(Mutation::RemoveAttr {
            node,
            name: name.to_string(),
        });
        true
    }

    /// Add `class`; already-present classes are left as is.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(el) = self.nodes.get_mut(&node) else {
            return false;
        };
        if el.has_class(class) {
            return true;
        }
        el.classes.push(class.to_string());
        self.log.push(Mutation::AddClass {
            node,
            class: class.to_string(),
        });
        true
    }

    /// Add each whitespace-separated class in `classes`.
    pub fn add_classes(&mut self, node: NodeId, classes: &str) -> bool {
        classes
            .split_whitespace()
            .fold(true, |ok, class| self.add_class(node, class) && ok)
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(el) = self.nodes.get_mut(&node) else {
            return false;
        };
        let before = el.classes.len();
        el.classes.retain(|c| c != class);
        if el.classes.len() == before {
            return false;
        }
        self.log.push(Mutation::RemoveClass {
            node,
            class: class.to_string(),
        });
        true
    }

    /// Set an inline style property. An empty value removes the property.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> bool {
        let Some(el) = self.nodes.get_mut(&node) else {
            return false;
        };
        if value.is_empty() {
            el.style.remove(property);
        } else {
            el.style.insert(property.to_string(), value.to_string());
        }
        self.log.push(Mutation::SetStyle {
            node,
            property: property.to_string(),
            value: value.to_string(),
        });
        true
    }

    // --- Focus ---

    #[inline]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focus a connected node (without scrolling).
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_connected(node) {
            return false;
        }
        self.focused = Some(node);
        self.log.push(Mutation::Focus { node });
        true
    }

    pub fn blur(&mut self) {
        if self.focused.take().is_some() {
            self.log.push(Mutation::Blur);
        }
    }

    // --- Key listeners ---

    #[inline]
    pub fn key_listeners(&self) -> &KeyListeners {
        &self.key_listeners
    }

    /// Register a document-level key listener.
    pub fn add_key_listener(&mut self) -> ListenerId {
        let listener = self.key_listeners.add();
        self.log.push(Mutation::AddKeyListener { listener });
        listener
    }

    /// Unregister a key listener. Returns `false` if it was not registered.
    pub fn remove_key_listener(&mut self, listener: ListenerId) -> bool {
        if !self.key_listeners.remove(listener) {
            return false;
        }
        self.log.push(Mutation::RemoveKeyListener { listener });
        true
    }

    // --- Mutation log ---

    /// Mutations recorded since the last [`Document::take_mutations`].
    #[inline]
    pub fn mutations(&self) -> &[Mutation] {
        &self.log
    }

    /// Drain the mutation log.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.log)
    }

    /// Whether `node` was adopted from the host rather than created.
    pub fn is_adopted(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|e| e.adopted)
    }
}
