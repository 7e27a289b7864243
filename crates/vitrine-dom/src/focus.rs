#![forbid(unsafe_code)]

//! Scoped focus acquisition.
//!
//! A [`FocusScope`] remembers who held focus when an overlay was created,
//! moves focus into the overlay when asked, and hands it back when the
//! overlay goes away.
//!
//! # Invariants
//!
//! - Focus is only handed back if nothing else took it in the meantime:
//!   after the overlay subtree is removed, focus is either inside nothing
//!   (cleared by the removal) or somewhere the user put it. Only the first
//!   case restores.
//! - A prior owner that was itself removed is never focused.

use vitrine_core::NodeId;

use crate::document::Document;

/// Focus owner saved across an overlay's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusScope {
    prior: Option<NodeId>,
}

impl FocusScope {
    /// Record the current focus owner.
    pub fn capture(doc: &Document) -> Self {
        Self {
            prior: doc.focused(),
        }
    }

    /// The focus owner at capture time.
    #[inline]
    pub fn prior(&self) -> Option<NodeId> {
        self.prior
    }

    /// Move focus to `target`.
    pub fn enter(&self, doc: &mut Document, target: NodeId) -> bool {
        doc.focus(target)
    }

    /// Give focus back to the captured owner, if focus is currently free
    /// and that owner is still connected.
    pub fn restore(self, doc: &mut Document) -> bool {
        if doc.focused().is_some() {
            return false;
        }
        match self.prior {
            Some(prior) if doc.is_connected(prior) => doc.focus(prior),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected_button(doc: &mut Document) -> NodeId {
        let b = doc.create_element("button");
        let body = doc.body();
        doc.append_child(body, b);
        b
    }

    #[test]
    fn restore_after_overlay_removal() {
        let mut doc = Document::new();
        let card = connected_button(&mut doc);
        doc.focus(card);

        let scope = FocusScope::capture(&doc);
        let overlay = connected_button(&mut doc);
        assert!(scope.enter(&mut doc, overlay));
        doc.remove(overlay);
        assert_eq!(doc.focused(), None);

        assert!(scope.restore(&mut doc));
        assert_eq!(doc.focused(), Some(card));
    }

    #[test]
    fn restore_leaves_user_moved_focus_alone() {
        let mut doc = Document::new();
        let card = connected_button(&mut doc);
        let other = connected_button(&mut doc);
        doc.focus(card);
        let scope = FocusScope::capture(&doc);
        doc.focus(other);
        assert!(!scope.restore(&mut doc));
        assert_eq!(doc.focused(), Some(other));
    }

    #[test]
    fn restore_skips_removed_prior() {
        let mut doc = Document::new();
        let card = connected_button(&mut doc);
        doc.focus(card);
        let scope = FocusScope::capture(&doc);
        doc.remove(card);
        assert!(!scope.restore(&mut doc));
        assert_eq!(doc.focused(), None);
    }
}
