#![forbid(unsafe_code)]

//! Core types for Vitrine: node identity, input events, and the
//! host-driven task scheduler.
//!
//! Vitrine never talks to a browser directly. A host (the wasm runner, or a
//! test) feeds typed [`event::Event`]s in, advances the virtual clock of a
//! [`schedule::Scheduler`], and runs whatever tasks come due. Everything in
//! this crate is deterministic and single-threaded.

pub mod event;
pub mod logging;
pub mod node;
pub mod schedule;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, Outcome};
pub use node::NodeId;
pub use schedule::{Scheduler, TaskHandle};
