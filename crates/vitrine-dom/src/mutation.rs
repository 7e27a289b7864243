#![forbid(unsafe_code)]

//! Mutation log replayed by the host onto the real DOM.
//!
//! Every write to a [`crate::Document`] appends one [`Mutation`]. The host
//! drains the log once per turn (`Document::take_mutations`) and applies
//! the entries in order; node ids map to real elements through the `Adopt`
//! and `Create` entries.

use vitrine_core::NodeId;

use crate::listeners::ListenerId;

/// A single document write.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Mutation {
    /// Bind `node` to a pre-existing host element found by `selector`.
    Adopt { node: NodeId, selector: String },
    /// Create a detached element.
    Create { node: NodeId, tag: String },
    /// Move `child` to the end of `parent`'s children.
    Append { parent: NodeId, child: NodeId },
    /// Detach and drop `node` and its subtree.
    Remove { node: NodeId },
    /// Detach and drop every child of `node`.
    ClearChildren { node: NodeId },
    SetText { node: NodeId, text: String },
    SetAttr { node: NodeId, name: String, value: String },
    RemoveAttr { node: NodeId, name: String },
    AddClass { node: NodeId, class: String },
    RemoveClass { node: NodeId, class: String },
    /// Set an inline style property; an empty value removes it.
    SetStyle { node: NodeId, property: String, value: String },
    /// Focus without scrolling the page.
    Focus { node: NodeId },
    Blur,
    AddKeyListener { listener: ListenerId },
    RemoveKeyListener { listener: ListenerId },
}

impl Mutation {
    /// The node this mutation writes to, if any.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Adopt { node, .. }
            | Self::Create { node, .. }
            | Self::Remove { node }
            | Self::ClearChildren { node }
            | Self::SetText { node, .. }
            | Self::SetAttr { node, .. }
            | Self::RemoveAttr { node, .. }
            | Self::AddClass { node, .. }
            | Self::RemoveClass { node, .. }
            | Self::SetStyle { node, .. }
            | Self::Focus { node } => Some(*node),
            Self::Append { child, .. } => Some(*child),
            Self::Blur | Self::AddKeyListener { .. } | Self::RemoveKeyListener { .. } => None,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_op_tag() {
        let m = Mutation::AddClass {
            node: NodeId::new(3),
            class: "is-open".into(),
        };
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"op":"add_class","node":3,"class":"is-open"}"#);
        assert_eq!(
            serde_json::to_string(&Mutation::Blur).unwrap(),
            r#"{"op":"blur"}"#
        );
    }
}
