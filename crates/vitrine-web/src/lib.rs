#![forbid(unsafe_code)]

//! Vitrine showcase app and its host boundary.
//!
//! - [`Catalog`] loads items leniently from JSON.
//! - [`ShowcaseConfig`] carries timings, assets and host selectors (TOML).
//! - [`InputEvent`] decodes host events.
//! - [`ShowcaseApp`] wires hero, grid and overlay to one document and one
//!   scheduler and hands mutations back as patches.
//!
//! On `wasm32`, `ShowcaseRunner` exposes the app to JavaScript.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod runner;

pub use app::{AppTask, ShowcaseApp, outcome_name};
pub use catalog::Catalog;
pub use config::{Selectors, ShowcaseConfig};
pub use error::ShowcaseError;
pub use input::InputEvent;
#[cfg(target_arch = "wasm32")]
pub use runner::ShowcaseRunner;
