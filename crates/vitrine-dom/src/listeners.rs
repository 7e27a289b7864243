#![forbid(unsafe_code)]

//! Registry of document-level key listeners.
//!
//! A browser has exactly one `document`, so its key listeners are a
//! process-wide resource. The registry makes registration explicit: each
//! owner holds the [`ListenerId`] it was handed and must give it back to
//! unregister. The host only forwards key events to owners whose id is
//! still registered, which is what keeps a torn-down overlay from reacting
//! to keys.

use core::fmt;

/// Identifier of a registered document-level key listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ListenerId(u64);

impl ListenerId {
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Ordered set of registered key listeners.
#[derive(Debug, Clone)]
pub struct KeyListeners {
    next: u64,
    active: Vec<ListenerId>,
}

impl Default for KeyListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyListeners {
    pub fn new() -> Self {
        Self {
            next: 1,
            active: Vec::new(),
        }
    }

    /// Register a new listener and return its id.
    pub(crate) fn add(&mut self) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.active.push(id);
        id
    }

    /// Unregister `id`. Returns `false` if it was not registered.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        match self.active.iter().position(|l| *l == id) {
            Some(idx) => {
                self.active.remove(idx);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.active.contains(&id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Registered listeners in registration order.
    pub fn iter(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.active.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ordered() {
        let mut reg = KeyListeners::new();
        let a = reg.add();
        let b = reg.add();
        assert_ne!(a, b);
        assert_eq!(reg.iter().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut reg = KeyListeners::new();
        let a = reg.add();
        assert!(reg.remove(a));
        assert!(!reg.remove(a));
        assert!(reg.is_empty());
        assert!(!reg.contains(a));
    }

    #[test]
    fn ids_are_not_reused() {
        let mut reg = KeyListeners::new();
        let a = reg.add();
        reg.remove(a);
        let b = reg.add();
        assert_ne!(a, b);
    }
}
