#![forbid(unsafe_code)]

//! Page scroll lock as an explicit acquire/release resource.
//!
//! Locking sets `overflow: hidden` on `body`. The value that was there
//! before is saved on acquire and written back verbatim on release.
//!
//! # Invariants
//!
//! 1. Acquire is idempotent, not counted: a second acquire while held
//!    neither re-saves the prior value nor requires a second release.
//! 2. Release restores exactly the value observed by the acquire that took
//!    the lock (including "unset").
//! 3. Release without a held lock is a no-op.

use crate::document::Document;

/// Inline style property used to suppress page scrolling.
pub const SCROLL_PROPERTY: &str = "overflow";
/// Value written while the lock is held.
pub const LOCKED_VALUE: &str = "hidden";

/// Owner of the page scroll lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollLock {
    /// Prior `overflow` value (empty when unset) while held.
    saved: Option<String>,
}

impl ScrollLock {
    pub const fn new() -> Self {
        Self { saved: None }
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.saved.is_some()
    }

    /// The value that release will restore, while held.
    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }

    /// Lock page scrolling. Returns `false` if already held.
    pub fn acquire(&mut self, doc: &mut Document) -> bool {
        if self.saved.is_some() {
            return false;
        }
        let body = doc.body();
        let prior = doc.style(body, SCROLL_PROPERTY).unwrap_or("").to_string();
        doc.set_style(body, SCROLL_PROPERTY, LOCKED_VALUE);
        tracing::trace!(prior = %prior, "scroll lock acquired");
        self.saved = Some(prior);
        true
    }

    /// Restore the saved value. Returns `false` if not held.
    pub fn release(&mut self, doc: &mut Document) -> bool {
        let Some(prior) = self.saved.take() else {
            return false;
        };
        let body = doc.body();
        doc.set_style(body, SCROLL_PROPERTY, &prior);
        tracing::trace!(restored = %prior, "scroll lock released");
        true
    }
}
