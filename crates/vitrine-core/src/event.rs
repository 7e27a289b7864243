#![forbid(unsafe_code)]

//! Input events delivered by the host.
//!
//! The host translates browser events into these types before handing them
//! to widgets. Only the parts of a browser event that Vitrine acts on are
//! carried: the key for keyboard input, and the exact target node for
//! clicks and image load failures.

use bitflags::bitflags;

use crate::node::NodeId;

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT = 0b0010;
        const CTRL = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Logical key, following the DOM `KeyboardEvent.key` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    Escape,
    Enter,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Char(char),
    /// Any key Vitrine has no name for.
    Unidentified,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` string to a key code.
    ///
    /// Legacy IE/Edge names (`"Esc"`, `"Left"`, ...) are accepted too.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::Char(ch),
                    _ => Self::Unidentified,
                }
            }
        }
    }
}

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyEventKind {
    #[default]
    Press,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }
}

/// Input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A document-level key event.
    Key(KeyEvent),
    /// A click whose innermost target is the given node.
    Click(NodeId),
    /// An image node failed to load its source.
    ImageError(NodeId),
}

impl Event {
    /// Shorthand for a plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }
}

/// What a handler did with an event.
///
/// The host uses this to decide whether to call `preventDefault()` on the
/// originating browser event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Not handled; let it propagate with default behavior.
    #[default]
    Ignored,
    /// Handled; default behavior left alone.
    Handled,
    /// Handled, and the default action (e.g. arrow-key scrolling) must be
    /// suppressed.
    PreventDefault,
}

impl Outcome {
    #[inline]
    #[must_use]
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    #[inline]
    #[must_use]
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::PreventDefault)
    }

    /// The first handled outcome of `self` and `other`.
    #[must_use]
    pub fn or_else(self, other: impl FnOnce() -> Outcome) -> Outcome {
        if self.is_handled() { self } else { other() }
    }
}
