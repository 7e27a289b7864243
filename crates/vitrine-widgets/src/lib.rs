#![forbid(unsafe_code)]

//! Widgets for the Vitrine showcase: hero, card grid, and the detail
//! overlay with its photo carousel.
//!
//! Widgets hold node ids into a [`vitrine_dom::Document`] plus their own
//! state. They take the document and a [`vitrine_core::Scheduler`] by
//! mutable reference on every call, so the owner decides how tasks are
//! stored: each widget's task type only needs to convert into the owner's
//! (`T: From<ModalTask>` and so on).

pub mod grid;
pub mod hero;
pub mod item;
pub mod modal;

pub use grid::{CARD_OPEN_DELAY, CardGrid, GridTask};
pub use hero::{HERO_FALLBACK, HERO_TRANSITION_DURATION, HeroTask, HeroTransition};
pub use item::{DisplayItem, RatingInput};
pub use modal::{
    DismissReason, InstanceId, ModalConfig, ModalController, ModalPhase, ModalTask, PhotoSet,
    PhotoStage,
};
