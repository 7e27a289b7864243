#![forbid(unsafe_code)]

//! JSON input events from the host.
//!
//! ```json
//! {"type": "key", "key": "ArrowLeft"}
//! {"type": "key", "key": "Escape", "phase": "release"}
//! {"type": "click", "target": 12}
//! {"type": "image_error", "target": 7}
//! {"type": "frame", "time_ms": 1033.5}
//! ```
//!
//! `key` uses DOM `KeyboardEvent.key` names. `target` is the node id from
//! the mutation log.

use std::time::Duration;

use serde::Deserialize;
use vitrine_core::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, NodeId};

use crate::error::ShowcaseError;

/// An event as the host encodes it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Key {
        key: String,
        #[serde(default)]
        phase: KeyEventKind,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    Click {
        target: NodeId,
    },
    ImageError {
        target: NodeId,
    },
    /// Animation frame at the host's monotonic time.
    Frame {
        time_ms: f64,
    },
}

impl InputEvent {
    /// Decode one event.
    pub fn from_json(source: &str) -> Result<Self, ShowcaseError> {
        serde_json::from_str(source).map_err(|e| ShowcaseError::Input(e.to_string()))
    }

    /// The document event this encodes, or `None` for frame ticks.
    pub fn to_event(&self) -> Option<Event> {
        match self {
            Self::Key {
                key,
                phase,
                shift,
                alt,
                ctrl,
                meta,
            } => {
                let mut modifiers = Modifiers::empty();
                modifiers.set(Modifiers::SHIFT, *shift);
                modifiers.set(Modifiers::ALT, *alt);
                modifiers.set(Modifiers::CTRL, *ctrl);
                modifiers.set(Modifiers::SUPER, *meta);
                Some(Event::Key(
                    KeyEvent::new(KeyCode::from_dom_key(key))
                        .with_modifiers(modifiers)
                        .with_kind(*phase),
                ))
            }
            Self::Click { target } => Some(Event::Click(*target)),
            Self::ImageError { target } => Some(Event::ImageError(*target)),
            Self::Frame { .. } => None,
        }
    }

    /// Host time carried by a frame tick. Negative or non-finite times are
    /// rejected.
    pub fn frame_time(&self) -> Option<Duration> {
        match self {
            Self::Frame { time_ms } => Duration::try_from_secs_f64(time_ms / 1000.0).ok(),
            _ => None,
        }
    }
}
