#![forbid(unsafe_code)]

//! Double-buffered photo stage.
//!
//! The stage owns two image slots stacked on top of each other. Exactly one
//! is visible (the *front* slot). Navigating loads the target photo into
//! the hidden *back* slot, shows it, hides the old front, and swaps the
//! roles, so the CSS crossfade always runs between two fully-populated
//! images.
//!
//! # Invariants
//!
//! 1. `current_index()` is always in `[0, len)`.
//! 2. Exactly one slot carries `is-visible`, and it is the ring's front.
//! 3. The counter text is `"{current_index + 1} / {len}"` after every
//!    successful navigation.
//! 4. Navigation buttons exist only when there is more than one photo.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Single photo | `len == 1` | `navigate` returns `false`, stage untouched |
//! | Full lap | `delta` a multiple of `len` | `navigate` returns `false` |
//! | Broken image | Slot reports a load error | Source swapped to the fallback once |
//! | Broken fallback | Fallback itself fails | Ignored, no retry loop |

use vitrine_core::{NodeId, Outcome};
use vitrine_dom::Document;

use super::photo_set::PhotoSet;

/// Class marking the visible slot.
pub const VISIBLE_CLASS: &str = "is-visible";

/// Index reached by moving `delta` steps from `current` around a ring of
/// `len` items. Valid for any integer `delta`, negative included.
///
/// An empty ring has no positions; the result is then `0`.
pub fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = (current as i128 + delta as i128).rem_euclid(len as i128);
    target as usize
}

/// Two image slots with a movable front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRing {
    slots: [NodeId; 2],
    front: usize,
}

impl SlotRing {
    /// Ring with `primary` in front.
    pub const fn new(primary: NodeId, secondary: NodeId) -> Self {
        Self {
            slots: [primary, secondary],
            front: 0,
        }
    }

    #[inline]
    pub fn front(&self) -> NodeId {
        self.slots[self.front]
    }

    #[inline]
    pub fn back(&self) -> NodeId {
        self.slots[1 - self.front]
    }

    /// Make the back slot the front one.
    #[inline]
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
    }

    /// Whether the first allocated slot is in front.
    #[inline]
    pub fn is_primary_front(&self) -> bool {
        self.front == 0
    }

    #[inline]
    pub fn slots(&self) -> [NodeId; 2] {
        self.slots
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.slots.contains(&node)
    }
}

/// The carousel inside an overlay.
#[derive(Debug, Clone)]
pub struct PhotoStage {
    root: NodeId,
    ring: SlotRing,
    counter: NodeId,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    photos: PhotoSet,
    index: usize,
    label: String,
    fallback: String,
}

fn photo_alt(label: &str, index: usize) -> String {
    format!("{label} photo {}", index + 1)
}

fn counter_text(index: usize, len: usize) -> String {
    format!("{} / {len}", index + 1)
}

fn build_slot(doc: &mut Document, src: &str, alt: &str) -> NodeId {
    let img = doc.create_element("img");
    doc.add_class(img, "modal-photo-layer");
    doc.set_attr(img, "src", src);
    doc.set_attr(img, "alt", alt);
    doc.set_attr(img, "decoding", "async");
    doc.set_attr(img, "loading", "eager");
    img
}

fn build_nav(doc: &mut Document, direction: &str, label: &str, glyph: &str) -> NodeId {
    let button = doc.create_element("button");
    doc.set_attr(button, "type", "button");
    doc.add_classes(button, "modal-photo-nav");
    doc.add_class(button, direction);
    doc.set_attr(button, "aria-label", label);
    doc.set_text(button, glyph);
    button
}

impl PhotoStage {
    /// Build the stage subtree (detached) for `photos`.
    ///
    /// `label` is the item name used in image alt text.
    pub fn build(doc: &mut Document, photos: PhotoSet, label: &str, fallback: &str) -> Self {
        let root = doc.create_element("div");
        doc.add_class(root, "modal-photo-stage");

        let first = photos.first().to_string();
        let alt = photo_alt(label, 0);
        let primary = build_slot(doc, &first, &alt);
        let secondary = build_slot(doc, &first, &alt);
        doc.add_class(primary, VISIBLE_CLASS);
        doc.append_children(root, &[primary, secondary]);

        let counter = doc.create_element("div");
        doc.add_class(counter, "modal-photo-count");
        doc.set_text(counter, counter_text(0, photos.len()));
        doc.append_child(root, counter);

        let (prev, next) = if photos.len() > 1 {
            let prev = build_nav(doc, "prev", "Previous photo", "←");
            let next = build_nav(doc, "next", "Next photo", "→");
            doc.append_children(root, &[prev, next]);
            (Some(prev), Some(next))
        } else {
            (None, None)
        };

        Self {
            root,
            ring: SlotRing::new(primary, secondary),
            counter,
            prev,
            next,
            photos,
            index: 0,
            label: label.to_string(),
            fallback: fallback.to_string(),
        }
    }

    /// Move `delta` photos, wrapping in both directions.
    ///
    /// Returns `true` if the visible photo changed.
    pub fn navigate(&mut self, doc: &mut Document, delta: isize) -> bool {
        if !self.has_multiple() {
            return false;
        }
        let target = wrap_index(self.index, delta, self.photos.len());
        if target == self.index {
            return false;
        }

        let incoming = self.ring.back();
        let outgoing = self.ring.front();
        let src = self
            .photos
            .get(target)
            .unwrap_or(self.fallback.as_str())
            .to_string();
        doc.set_attr(incoming, "src", src);
        doc.set_attr(incoming, "alt", photo_alt(&self.label, target));
        doc.add_class(incoming, VISIBLE_CLASS);
        doc.remove_class(outgoing, VISIBLE_CLASS);
        self.ring.swap();

        self.index = target;
        doc.set_text(self.counter, counter_text(target, self.photos.len()));
        tracing::trace!(index = target, len = self.photos.len(), "photo stage navigated");
        true
    }

    /// Route a click on a navigation button.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> Outcome {
        let delta = if self.prev.is_some_and(|b| doc.contains(b, target)) {
            -1
        } else if self.next.is_some_and(|b| doc.contains(b, target)) {
            1
        } else {
            return Outcome::Ignored;
        };
        self.navigate(doc, delta);
        Outcome::Handled
    }

    /// Swap a failed slot to the fallback asset.
    ///
    /// Returns `false` if `node` is not a slot or already shows the fallback.
    pub fn handle_image_error(&self, doc: &mut Document, node: NodeId) -> bool {
        if !self.ring.contains(node) || doc.attr(node, "src") == Some(self.fallback.as_str()) {
            return false;
        }
        tracing::debug!(slot = %node, "photo failed to load, using fallback");
        doc.set_attr(node, "src", self.fallback.as_str())
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Always `false`; a stage holds at least the fallback.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    #[inline]
    pub fn has_multiple(&self) -> bool {
        self.photos.len() > 1
    }

    /// Whether the first slot is the visible one.
    #[inline]
    pub fn is_showing_primary_slot(&self) -> bool {
        self.ring.is_primary_front()
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn ring(&self) -> SlotRing {
        self.ring
    }

    #[inline]
    pub fn counter(&self) -> NodeId {
        self.counter
    }

    #[inline]
    pub fn prev_button(&self) -> Option<NodeId> {
        self.prev
    }

    #[inline]
    pub fn next_button(&self) -> Option<NodeId> {
        self.next
    }

    pub fn photos(&self) -> &PhotoSet {
        &self.photos
    }
}
