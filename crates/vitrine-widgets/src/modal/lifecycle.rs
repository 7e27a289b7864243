#![forbid(unsafe_code)]

//! Single-instance overlay lifecycle.
//!
//! [`ModalController`] mounts at most one overlay under a fixed mount
//! point. Opening builds the overlay, locks page scroll, registers a
//! document key listener and requests a frame to reveal it. Closing plays
//! the exit animation and then tears everything down.
//!
//! ```text
//!   open ──▶ Opening ──(frame)──▶ Open
//!               │                   │
//!               └──── close ────────┴──▶ Closing ──(exit_duration)──▶ gone
//!
//!   open while mounted: previous instance torn down immediately
//! ```
//!
//! # Invariants
//!
//! 1. At most one instance is mounted; a new `open` destroys the previous
//!    one synchronously, without an exit animation.
//! 2. While an instance is mounted the scroll lock is held and exactly one
//!    key listener is registered for it. Both are released on teardown on
//!    every path (timed close, replacement, [`ModalController::destroy`]).
//! 3. Scheduled tasks carry the instance id. A task for an instance that
//!    is no longer mounted, or that is in the wrong phase, does nothing.
//! 4. Focus returns to whoever held it before the overlay opened, provided
//!    focus was not moved elsewhere and that node is still attached.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Double close | `close` while closing or closed | Returns `false`, no second teardown |
//! | Early close | `close` before the reveal frame | Reveal cancelled, overlay never gets `is-open` |
//! | Stale task | Task fires after its instance was replaced | Ignored |
//! | Missing mount | Mount node removed by the host | Overlay stays detached, lifecycle still runs |

use vitrine_core::{Event, KeyCode, NodeId, Outcome, Scheduler, TaskHandle};
use vitrine_dom::{Document, FocusScope, ListenerId, ScrollLock};

use super::config::ModalConfig;
use super::content::build_content;
use super::photo_set::PhotoSet;
use super::stage::PhotoStage;
use crate::item::DisplayItem;

/// Class added on the first frame after mount.
pub const OPEN_CLASS: &str = "is-open";
/// Class present during the exit animation.
pub const CLOSING_CLASS: &str = "is-closing";

/// Identity of one mounted overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Deferred work the controller hands to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTask {
    /// Add `is-open` and focus the close control.
    Reveal(InstanceId),
    /// Unmount after the exit animation.
    Teardown(InstanceId),
}

/// Where an instance is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    /// Mounted, waiting for the reveal frame.
    Opening,
    /// Revealed.
    Open,
    /// Exit animation running; teardown scheduled.
    Closing,
}

/// What triggered a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    Backdrop,
    Escape,
    Programmatic,
}

#[derive(Debug)]
struct ModalInstance {
    id: InstanceId,
    backdrop: NodeId,
    dialog: NodeId,
    close_button: NodeId,
    stage: PhotoStage,
    listener: ListenerId,
    phase: ModalPhase,
    reveal: Option<TaskHandle>,
    teardown: Option<TaskHandle>,
    focus: FocusScope,
}

/// Owner of the overlay slot.
#[derive(Debug)]
pub struct ModalController {
    mount: NodeId,
    config: ModalConfig,
    active: Option<ModalInstance>,
    scroll_lock: ScrollLock,
    next_instance: u64,
    last_dismissal: Option<DismissReason>,
}

impl ModalController {
    /// Controller mounting overlays under `mount`.
    pub fn new(mount: NodeId) -> Self {
        Self {
            mount,
            config: ModalConfig::default(),
            active: None,
            scroll_lock: ScrollLock::new(),
            next_instance: 1,
            last_dismissal: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    /// Mount an overlay for `item`, replacing any current one.
    pub fn open<T>(
        &mut self,
        doc: &mut Document,
        sched: &mut Scheduler<T>,
        item: &DisplayItem,
    ) -> InstanceId
    where
        T: From<ModalTask>,
    {
        if self.active.is_some() {
            tracing::debug!("replacing mounted overlay");
            self.destroy(doc, sched);
        }

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        let focus = FocusScope::capture(doc);

        let photos = PhotoSet::from_sources(
            &item.photos,
            &self.config.fallback_photo,
            self.config.max_photos,
        );

        let backdrop = doc.create_element("div");
        doc.add_class(backdrop, "modal-backdrop");

        let dialog = doc.create_element("article");
        doc.add_class(dialog, "hotel-modal");
        doc.set_attr(dialog, "role", "dialog");
        doc.set_attr(dialog, "aria-modal", "true");
        doc.set_attr(dialog, "aria-label", format!("{} details", item.name));

        let content = build_content(doc, item);

        let titlebar = doc.create_element("header");
        doc.add_class(titlebar, "modal-titlebar");
        let close_button = doc.create_element("button");
        doc.set_attr(close_button, "type", "button");
        doc.add_class(close_button, "modal-close");
        doc.set_attr(close_button, "aria-label", "Close details");
        doc.set_text(close_button, "✕");
        doc.append_children(titlebar, &[content.title, close_button]);

        let stage = PhotoStage::build(doc, photos, &item.name, &self.config.fallback_photo);

        doc.append_children(dialog, &[titlebar, stage.root()]);
        doc.append_children(dialog, &content.body());
        doc.append_child(backdrop, dialog);
        if !doc.append_child(self.mount, backdrop) {
            tracing::warn!(mount = %self.mount, "modal mount point missing");
        }

        self.scroll_lock.acquire(doc);
        let listener = doc.add_key_listener();
        let reveal = sched.request_frame(ModalTask::Reveal(id));

        tracing::debug!(
            instance = id.id(),
            name = %item.name,
            photos = stage.len(),
            "overlay mounted"
        );

        self.active = Some(ModalInstance {
            id,
            backdrop,
            dialog,
            close_button,
            stage,
            listener,
            phase: ModalPhase::Opening,
            reveal: Some(reveal),
            teardown: None,
            focus,
        });
        self.last_dismissal = None;
        id
    }

    /// Start the exit animation and schedule teardown.
    ///
    /// Returns `false` if nothing is mounted or the overlay is already
    /// closing.
    pub fn close<T>(&mut self, doc: &mut Document, sched: &mut Scheduler<T>) -> bool
    where
        T: From<ModalTask>,
    {
        self.dismiss(doc, sched, DismissReason::Programmatic)
    }

    fn dismiss<T>(
        &mut self,
        doc: &mut Document,
        sched: &mut Scheduler<T>,
        reason: DismissReason,
    ) -> bool
    where
        T: From<ModalTask>,
    {
        let delay = self.config.exit_duration;
        let Some(instance) = self.active.as_mut() else {
            tracing::trace!(?reason, "close ignored: nothing mounted");
            return false;
        };
        if instance.phase == ModalPhase::Closing {
            tracing::trace!(?reason, "close ignored: already closing");
            return false;
        }

        instance.phase = ModalPhase::Closing;
        if let Some(reveal) = instance.reveal.take() {
            sched.cancel(reveal);
        }
        doc.remove_class(instance.backdrop, OPEN_CLASS);
        doc.add_class(instance.backdrop, CLOSING_CLASS);
        instance.teardown = Some(sched.schedule_after(delay, ModalTask::Teardown(instance.id)));

        tracing::debug!(instance = instance.id.id(), ?reason, "overlay closing");
        self.last_dismissal = Some(reason);
        true
    }

    /// Unmount immediately, skipping the exit animation.
    ///
    /// Pending reveal and teardown tasks are cancelled. Returns `false` if
    /// nothing was mounted.
    pub fn destroy<T>(&mut self, doc: &mut Document, sched: &mut Scheduler<T>) -> bool {
        let Some(instance) = self.active.as_mut() else {
            return false;
        };
        for handle in [instance.reveal.take(), instance.teardown.take()]
            .into_iter()
            .flatten()
        {
            sched.cancel(handle);
        }
        self.teardown(doc)
    }

    fn teardown(&mut self, doc: &mut Document) -> bool {
        let Some(instance) = self.active.take() else {
            return false;
        };
        doc.remove(instance.backdrop);
        doc.remove_key_listener(instance.listener);
        self.scroll_lock.release(doc);
        let restored = instance.focus.restore(doc);
        tracing::debug!(instance = instance.id.id(), restored, "overlay torn down");
        true
    }

    /// Run a task previously handed to the scheduler.
    ///
    /// Returns `true` if the task applied to the mounted instance.
    pub fn run_task(&mut self, doc: &mut Document, task: ModalTask) -> bool {
        match task {
            ModalTask::Reveal(id) => {
                let Some(instance) = self.active.as_mut() else {
                    return false;
                };
                if instance.id != id || instance.phase != ModalPhase::Opening {
                    tracing::trace!(task = id.id(), "stale reveal ignored");
                    return false;
                }
                instance.reveal = None;
                instance.phase = ModalPhase::Open;
                doc.add_class(instance.backdrop, OPEN_CLASS);
                instance.focus.enter(doc, instance.close_button);
                true
            }
            ModalTask::Teardown(id) => {
                let current = self
                    .active
                    .as_ref()
                    .is_some_and(|i| i.id == id && i.phase == ModalPhase::Closing);
                if !current {
                    tracing::trace!(task = id.id(), "stale teardown ignored");
                    return false;
                }
                if let Some(instance) = self.active.as_mut() {
                    instance.teardown = None;
                }
                self.teardown(doc)
            }
        }
    }

    /// Route an input event to the mounted overlay.
    ///
    /// Key events are only honored while this overlay's listener is
    /// registered and only on press.
    pub fn handle_event<T>(
        &mut self,
        doc: &mut Document,
        sched: &mut Scheduler<T>,
        event: &Event,
    ) -> Outcome
    where
        T: From<ModalTask>,
    {
        let Some(instance) = self.active.as_ref() else {
            return Outcome::Ignored;
        };
        let (backdrop, close_button, listener) =
            (instance.backdrop, instance.close_button, instance.listener);

        match *event {
            Event::Key(key) => {
                if !key.is_press() || !doc.key_listeners().contains(listener) {
                    return Outcome::Ignored;
                }
                match key.code {
                    KeyCode::Escape => {
                        if self.dismiss(doc, sched, DismissReason::Escape) {
                            Outcome::Handled
                        } else {
                            Outcome::Ignored
                        }
                    }
                    KeyCode::Left if instance.stage.has_multiple() => {
                        self.navigate(doc, -1);
                        Outcome::PreventDefault
                    }
                    KeyCode::Right if instance.stage.has_multiple() => {
                        self.navigate(doc, 1);
                        Outcome::PreventDefault
                    }
                    _ => Outcome::Ignored,
                }
            }
            Event::Click(target) => {
                if doc.contains(close_button, target) {
                    self.dismiss(doc, sched, DismissReason::CloseButton);
                    Outcome::Handled
                } else if target == backdrop {
                    self.dismiss(doc, sched, DismissReason::Backdrop);
                    Outcome::Handled
                } else if let Some(instance) = self.active.as_mut() {
                    instance.stage.handle_click(doc, target)
                } else {
                    Outcome::Ignored
                }
            }
            Event::ImageError(node) => {
                if instance.stage.handle_image_error(doc, node) {
                    Outcome::Handled
                } else {
                    Outcome::Ignored
                }
            }
        }
    }

    /// Move the mounted stage by `delta` photos.
    pub fn navigate(&mut self, doc: &mut Document, delta: isize) -> bool {
        self.active
            .as_mut()
            .is_some_and(|instance| instance.stage.navigate(doc, delta))
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn phase(&self) -> Option<ModalPhase> {
        self.active.as_ref().map(|i| i.phase)
    }

    pub fn is_closing(&self) -> bool {
        self.phase() == Some(ModalPhase::Closing)
    }

    pub fn instance_id(&self) -> Option<InstanceId> {
        self.active.as_ref().map(|i| i.id)
    }

    pub fn backdrop(&self) -> Option<NodeId> {
        self.active.as_ref().map(|i| i.backdrop)
    }

    pub fn dialog(&self) -> Option<NodeId> {
        self.active.as_ref().map(|i| i.dialog)
    }

    pub fn close_button(&self) -> Option<NodeId> {
        self.active.as_ref().map(|i| i.close_button)
    }

    pub fn stage(&self) -> Option<&PhotoStage> {
        self.active.as_ref().map(|i| &i.stage)
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.active.as_ref().map(|i| i.listener)
    }

    /// How the current or most recent instance was dismissed.
    pub fn last_dismissal(&self) -> Option<DismissReason> {
        self.last_dismissal
    }

    #[inline]
    pub fn mount(&self) -> NodeId {
        self.mount
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn setup() -> (Document, Scheduler<ModalTask>, ModalController) {
        let mut doc = Document::new();
        let mount = doc.adopt("div", "#modal-root");
        (doc, Scheduler::new(), ModalController::new(mount))
    }

    fn item() -> DisplayItem {
        DisplayItem::new("Casa").photos(["a.jpg", "b.jpg", "c.jpg"])
    }

    fn run_frame(doc: &mut Document, sched: &mut Scheduler<ModalTask>, c: &mut ModalController) {
        for task in sched.drain_frame() {
            c.run_task(doc, task);
        }
    }

    fn run_timers(
        doc: &mut Document,
        sched: &mut Scheduler<ModalTask>,
        c: &mut ModalController,
        elapsed: Duration,
    ) {
        for task in sched.advance(elapsed) {
            c.run_task(doc, task);
        }
    }

    #[test]
    fn open_builds_dialog_structure() {
        let (mut doc, mut sched, mut c) = setup();
        c.open(&mut doc, &mut sched, &item());

        let backdrop = c.backdrop().unwrap();
        let dialog = c.dialog().unwrap();
        assert_eq!(doc.parent(backdrop), Some(c.mount()));
        assert!(doc.has_class(backdrop, "modal-backdrop"));
        assert_eq!(doc.get(dialog).unwrap().tag(), "article");
        assert_eq!(doc.attr(dialog, "role"), Some("dialog"));
        assert_eq!(doc.attr(dialog, "aria-modal"), Some("true"));
        assert_eq!(doc.attr(dialog, "aria-label"), Some("Casa details"));
        assert_eq!(doc.attr(c.close_button().unwrap(), "aria-label"), Some("Close details"));
        assert_eq!(c.phase(), Some(ModalPhase::Opening));
        assert!(!doc.has_class(backdrop, OPEN_CLASS));
        assert!(c.scroll_lock().is_held());
    }

    #[test]
    fn reveal_opens_and_focuses_close_control() {
        let (mut doc, mut sched, mut c) = setup();
        c.open(&mut doc, &mut sched, &item());
        run_frame(&mut doc, &mut sched, &mut c);
        assert_eq!(c.phase(), Some(ModalPhase::Open));
        assert!(doc.has_class(c.backdrop().unwrap(), OPEN_CLASS));
        assert_eq!(doc.focused(), c.close_button());
    }

    #[test]
    fn close_runs_exit_then_teardown() {
        let (mut doc, mut sched, mut c) = setup();
        c.open(&mut doc, &mut sched, &item());
        run_frame(&mut doc, &mut sched, &mut c);
        let backdrop = c.backdrop().unwrap();

        assert!(c.close(&mut doc, &mut sched));
        assert!(c.is_closing());
        assert!(doc.has_class(backdrop, CLOSING_CLASS));
        assert!(!doc.has_class(backdrop, OPEN_CLASS));

        run_timers(&mut doc, &mut sched, &mut c, Duration::from_millis(149));
        assert!(doc.exists(backdrop));
        run_timers(&mut doc, &mut sched, &mut c, Duration::from_millis(1));
        assert!(!doc.exists(backdrop));
        assert!(!c.is_open());
        assert!(doc.key_listeners().is_empty());
        assert!(!c.scroll_lock().is_held());
    }

    #[test]
    fn escape_and_arrows() {
        let (mut doc, mut sched, mut c) = setup();
        c.open(&mut doc, &mut sched, &item());
        run_frame(&mut doc, &mut sched, &mut c);

        let right = Event::key(KeyCode::Right);
        assert_eq!(c.handle_event(&mut doc, &mut sched, &right), Outcome::PreventDefault);
        assert_eq!(c.stage().unwrap().current_index(), 1);
        let left = Event::key(KeyCode::Left);
        assert_eq!(c.handle_event(&mut doc, &mut sched, &left), Outcome::PreventDefault);
        assert_eq!(
            c.handle_event(&mut doc, &mut sched, &Event::key(KeyCode::Char('x'))),
            Outcome::Ignored
        );

        let esc = Event::key(KeyCode::Escape);
        assert_eq!(c.handle_event(&mut doc, &mut sched, &esc), Outcome::Handled);
        assert_eq!(c.last_dismissal(), Some(DismissReason::Escape));
        assert_eq!(c.handle_event(&mut doc, &mut sched, &esc), Outcome::Ignored);
    }

    #[test]
    fn arrows_pass_through_with_single_photo() {
        let (mut doc, mut sched, mut c) = setup();
        c.open(&mut doc, &mut sched, &DisplayItem::new("Solo"));
        let outcome = c.handle_event(&mut doc, &mut sched, &Event::key(KeyCode::Right));
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(c.stage().unwrap().photos().as_slice(), &[crate::modal::FALLBACK_PHOTO]);
    }

    #[test]
    fn key_release_is_ignored() {
        let (mut doc, mut sched, mut c) = setup();
        c.open(&mut doc, &mut sched, &item());
        let release = Event::Key(
            vitrine_core::KeyEvent::new(KeyCode::Escape)
                .with_kind(vitrine_core::KeyEventKind::Release),
        );
        assert_eq!(c.handle_event(&mut doc, &mut sched, &release), Outcome::Ignored);
        assert!(!c.is_closing());
    }

    #[test]
    fn destroy_cancels_pending_tasks() {
        let (mut doc, mut sched, mut c) = setup();
        c.open(&mut doc, &mut sched, &item());
        assert_eq!(sched.pending(), 1);
        assert!(c.destroy(&mut doc, &mut sched));
        assert_eq!(sched.pending(), 0);
        assert!(!c.destroy(&mut doc, &mut sched));
    }

    #[test]
    fn custom_exit_duration() {
        let (mut doc, mut sched, c) = setup();
        let mut c = c.with_config(ModalConfig::default().exit_duration(Duration::from_millis(10)));
        c.open(&mut doc, &mut sched, &item());
        c.close(&mut doc, &mut sched);
        assert_eq!(sched.next_deadline(), Some(Duration::from_millis(10)));
    }
}
