#![forbid(unsafe_code)]

//! Integration tests: replaying the mutation log reproduces the tree.
//!
//! A host applies the log to a real DOM. These tests apply it to a minimal
//! mirror instead and check that the mirror ends up structurally equal to
//! the document that produced the log.

use std::collections::{BTreeMap, BTreeSet};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vitrine_dom::{Document, Mutation, NodeId};

#[derive(Debug, Default, Clone, PartialEq)]
struct MirrorNode {
    tag: String,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct Mirror {
    nodes: BTreeMap<NodeId, MirrorNode>,
    parents: BTreeMap<NodeId, NodeId>,
    body: Option<NodeId>,
    focused: Option<NodeId>,
}

impl Mirror {
    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parents.remove(&node)
            && let Some(p) = self.nodes.get_mut(&parent)
        {
            p.children.retain(|c| *c != node);
        }
    }

    fn drop_subtree(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.remove(&node) {
            for child in n.children {
                self.parents.remove(&child);
                self.drop_subtree(child);
            }
        }
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    fn apply(&mut self, m: &Mutation) {
        match m {
            Mutation::Adopt { node, .. } => {
                self.nodes.insert(
                    *node,
                    MirrorNode {
                        tag: "adopted".to_string(),
                        ..MirrorNode::default()
                    },
                );
                // Adopted host elements hang off body.
                match self.body {
                    None => self.body = Some(*node),
                    Some(body) => {
                        self.nodes.get_mut(&body).unwrap().children.push(*node);
                        self.parents.insert(*node, body);
                    }
                }
            }
            Mutation::Create { node, tag } => {
                self.nodes.insert(
                    *node,
                    MirrorNode {
                        tag: tag.clone(),
                        ..MirrorNode::default()
                    },
                );
            }
            Mutation::Append { parent, child } => {
                self.detach(*child);
                self.nodes.get_mut(parent).unwrap().children.push(*child);
                self.parents.insert(*child, *parent);
            }
            Mutation::Remove { node } => {
                self.detach(*node);
                self.drop_subtree(*node);
            }
            Mutation::ClearChildren { node } => {
                let children = std::mem::take(&mut self.nodes.get_mut(node).unwrap().children);
                for child in children {
                    self.parents.remove(&child);
                    self.drop_subtree(child);
                }
            }
            Mutation::SetText { node, text } => {
                self.nodes.get_mut(node).unwrap().text = text.clone();
            }
            Mutation::SetAttr { node, name, value } => {
                self.nodes
                    .get_mut(node)
                    .unwrap()
                    .attrs
                    .insert(name.clone(), value.clone());
            }
            Mutation::RemoveAttr { node, name } => {
                self.nodes.get_mut(node).unwrap().attrs.remove(name);
            }
            Mutation::AddClass { node, class } => {
                self.nodes.get_mut(node).unwrap().classes.insert(class.clone());
            }
            Mutation::RemoveClass { node, class } => {
                self.nodes.get_mut(node).unwrap().classes.remove(class);
            }
            Mutation::Focus { node } => self.focused = Some(*node),
            Mutation::Blur => self.focused = None,
            Mutation::SetStyle { .. }
            | Mutation::AddKeyListener { .. }
            | Mutation::RemoveKeyListener { .. } => {}
        }
    }

    fn snapshot(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.write(root, 0, &mut out);
        out
    }

    fn write(&self, node: NodeId, depth: usize, out: &mut String) {
        let n = &self.nodes[&node];
        out.push_str(&format!(
            "{}{} {:?} {:?} {:?}\n",
            "  ".repeat(depth),
            n.tag,
            n.classes,
            n.attrs,
            n.text
        ));
        for child in &n.children {
            self.write(*child, depth + 1, out);
        }
    }
}

fn snapshot(doc: &Document, node: NodeId, depth: usize, out: &mut String) {
    let el = doc.get(node).unwrap();
    let classes: BTreeSet<String> = el.classes().iter().cloned().collect();
    let attrs: BTreeMap<String, String> = ["src", "alt", "href", "aria-label"]
        .iter()
        .filter_map(|k| el.attr(k).map(|v| ((*k).to_string(), v.to_string())))
        .collect();
    out.push_str(&format!(
        "{}{} {:?} {:?} {:?}\n",
        "  ".repeat(depth),
        if doc.is_adopted(node) { "adopted" } else { el.tag() },
        classes,
        attrs,
        el.text()
    ));
    for child in el.children() {
        snapshot(doc, *child, depth + 1, out);
    }
}

fn doc_snapshot(doc: &Document) -> String {
    let mut out = String::new();
    snapshot(doc, doc.body(), 0, &mut out);
    out
}

fn replay(doc: &Document) -> Mirror {
    let mut mirror = Mirror::default();
    for m in doc.mutations() {
        mirror.apply(m);
    }
    mirror
}

#[test]
fn replayed_overlay_matches_document() {
    let mut doc = Document::new();
    let root = doc.adopt("div", "#modal-root");
    let backdrop = doc.create_element("div");
    doc.add_class(backdrop, "modal-backdrop");
    let img = doc.create_element("img");
    doc.set_attr(img, "src", "a.jpg");
    doc.set_attr(img, "alt", "Casa photo 1");
    doc.add_class(img, "modal-photo-layer");
    doc.add_class(img, "is-visible");
    doc.append_child(backdrop, img);
    doc.append_child(root, backdrop);
    doc.focus(img);
    doc.remove_class(img, "is-visible");
    doc.set_attr(img, "src", "b.jpg");

    let mirror = replay(&doc);
    assert_eq!(mirror.snapshot(doc.body()), doc_snapshot(&doc));
    assert_eq!(mirror.focused, doc.focused());
}

#[test]
fn replayed_removal_clears_subtree_and_focus() {
    let mut doc = Document::new();
    let root = doc.adopt("div", "#modal-root");
    let backdrop = doc.create_element("div");
    let button = doc.create_element("button");
    doc.append_child(backdrop, button);
    doc.append_child(root, backdrop);
    doc.focus(button);
    doc.remove(backdrop);

    let mirror = replay(&doc);
    assert!(!mirror.nodes.contains_key(&backdrop));
    assert!(!mirror.nodes.contains_key(&button));
    assert_eq!(mirror.focused, None);
    assert_eq!(mirror.snapshot(doc.body()), doc_snapshot(&doc));
}

fn pick(ids: &[NodeId], i: usize) -> NodeId {
    ids[i % ids.len()]
}

#[derive(Debug, Clone)]
enum Op {
    Create,
    Append(usize, usize),
    Remove(usize),
    Class(usize, bool),
    Text(usize, u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Create),
        (0usize..16, 0usize..16).prop_map(|(a, b)| Op::Append(a, b)),
        (0usize..16).prop_map(Op::Remove),
        (0usize..16, any::<bool>()).prop_map(|(a, on)| Op::Class(a, on)),
        (0usize..16, any::<u8>()).prop_map(|(a, t)| Op::Text(a, t)),
    ]
}

proptest! {
    #[test]
    fn random_edit_sequences_replay_faithfully(ops in proptest::collection::vec(op(), 1..64)) {
        let mut doc = Document::new();
        let mut ids = vec![doc.body()];
        for op in ops {
            match op {
                Op::Create => ids.push(doc.create_element("div")),
                Op::Append(a, b) => {
                    let (parent, child) = (pick(&ids, a), pick(&ids, b));
                    doc.append_child(parent, child);
                }
                Op::Remove(a) => {
                    let node = pick(&ids, a);
                    doc.remove(node);
                }
                Op::Class(a, on) => {
                    let node = pick(&ids, a);
                    if on {
                        doc.add_class(node, "on");
                    } else {
                        doc.remove_class(node, "on");
                    }
                }
                Op::Text(a, t) => {
                    let node = pick(&ids, a);
                    doc.set_text(node, t.to_string());
                }
            }
        }
        let mirror = replay(&doc);
        prop_assert_eq!(mirror.snapshot(doc.body()), doc_snapshot(&doc));
    }
}
