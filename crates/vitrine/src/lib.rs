#![forbid(unsafe_code)]

//! Vitrine public facade.
//!
//! Re-exports the member crates and a [`prelude`] with the types most hosts
//! and widgets need.

pub use vitrine_core as core;
pub use vitrine_dom as dom;
#[cfg(feature = "web")]
pub use vitrine_web as web;
pub use vitrine_widgets as widgets;

pub use vitrine_core::{Event, KeyCode, NodeId, Outcome, Scheduler};
pub use vitrine_dom::{Document, Mutation};
pub use vitrine_widgets::{CardGrid, DisplayItem, HeroTransition, ModalController};

pub mod prelude {
    pub use vitrine_core::logging::LogFormat;
    pub use vitrine_core::{Event, KeyCode, KeyEvent, NodeId, Outcome, Scheduler, TaskHandle};
    pub use vitrine_dom::{Document, FocusScope, Mutation, ScrollLock};
    pub use vitrine_widgets::{
        CardGrid, DismissReason, DisplayItem, HeroTransition, ModalConfig, ModalController,
        ModalTask, PhotoSet, RatingInput,
    };

    #[cfg(feature = "web")]
    pub use vitrine_web::{Catalog, ShowcaseApp, ShowcaseConfig, ShowcaseError};
}
