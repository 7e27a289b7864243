#![forbid(unsafe_code)]

//! Host-driven retained document for Vitrine.
//!
//! Widgets build and mutate a [`Document`] instead of a browser DOM. The
//! document tracks the tree, focus, the page scroll lock and the
//! document-level key listeners, and records every write as a
//! [`Mutation`] for the host to replay.
//!
//! The two process-wide browser resources, page scrolling and document key
//! listeners, are modelled as explicit acquire/release types
//! ([`ScrollLock`], [`Document::add_key_listener`] /
//! [`Document::remove_key_listener`]) rather than global flags.

pub mod document;
pub mod focus;
pub mod listeners;
pub mod mutation;
pub mod scroll_lock;

pub use document::{Document, Element};
pub use focus::FocusScope;
pub use listeners::{KeyListeners, ListenerId};
pub use mutation::Mutation;
pub use scroll_lock::ScrollLock;
pub use vitrine_core::NodeId;
