#![forbid(unsafe_code)]

//! Detail overlay with a crossfading photo carousel.
//!
//! # Lifecycle
//!
//! [`ModalController`] owns the single overlay slot. It builds the overlay
//! from a [`DisplayItem`](crate::item::DisplayItem), acquires the page
//! scroll lock and a document key listener, and releases both on teardown.
//! Deferred steps (reveal on the next frame, teardown after the exit
//! animation) go through a [`vitrine_core::Scheduler`] as [`ModalTask`]
//! values the owner hands back via [`ModalController::run_task`].
//!
//! # Photos
//!
//! [`PhotoSet`] normalizes the item's photo list; [`PhotoStage`] shows it
//! through a two-slot [`SlotRing`].
//!
//! # Example
//!
//! ```ignore
//! let mut doc = Document::new();
//! let mount = doc.adopt("div", "#modal-root");
//! let mut sched: Scheduler<ModalTask> = Scheduler::new();
//! let mut modal = ModalController::new(mount);
//!
//! modal.open(&mut doc, &mut sched, &item);
//! for task in sched.drain_frame() {
//!     modal.run_task(&mut doc, task);
//! }
//! let patches = doc.take_mutations();
//! ```

mod config;
pub mod content;
mod lifecycle;
mod photo_set;
mod stage;

pub use config::{FALLBACK_PHOTO, MAX_PHOTOS, MODAL_EXIT_DURATION, ModalConfig};
pub use content::{ContentSections, RATING_SEGMENTS, RatingKind, build_content, normalize_rating};
pub use lifecycle::{
    CLOSING_CLASS, DismissReason, InstanceId, ModalController, ModalPhase, ModalTask, OPEN_CLASS,
};
pub use photo_set::{PhotoSet, is_usable_url, resolve_photo};
pub use stage::{PhotoStage, SlotRing, VISIBLE_CLASS, wrap_index};
