#![forbid(unsafe_code)]

//! `wasm-bindgen` surface for a JS host.
//!
//! The host owns the real DOM. Each animation frame it calls `tick`, then
//! `takePatches` and applies the returned mutations. DOM events are
//! forwarded through `dispatch`; when it returns `"prevent_default"` the
//! host calls `preventDefault()` on the original event.

use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::app::{ShowcaseApp, outcome_name};
use crate::catalog::Catalog;
use crate::config::ShowcaseConfig;
use crate::error::ShowcaseError;

fn to_js(err: ShowcaseError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// JS handle to a running showcase.
#[wasm_bindgen]
pub struct ShowcaseRunner {
    app: ShowcaseApp,
    started: Instant,
}

#[wasm_bindgen]
impl ShowcaseRunner {
    /// Build from a JSON catalog and an optional TOML config.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str, config_toml: Option<String>) -> Result<ShowcaseRunner, JsValue> {
        let catalog = Catalog::from_json(catalog_json).map_err(to_js)?;
        let config = match config_toml {
            Some(source) => ShowcaseConfig::from_toml(&source).map_err(to_js)?,
            None => ShowcaseConfig::default(),
        };
        Ok(Self {
            app: ShowcaseApp::new(catalog, config),
            started: Instant::now(),
        })
    }

    /// Forward one JSON-encoded event. Returns the outcome name.
    pub fn dispatch(&mut self, event_json: &str) -> Result<String, JsValue> {
        let outcome = self.app.dispatch_json(event_json).map_err(to_js)?;
        Ok(outcome_name(outcome).to_string())
    }

    /// Run the work due at the current wall-clock time.
    pub fn tick(&mut self) -> u32 {
        let ran = self.app.frame(self.started.elapsed());
        u32::try_from(ran).unwrap_or(u32::MAX)
    }

    /// Drain pending mutations as a JSON array.
    #[wasm_bindgen(js_name = takePatches)]
    pub fn take_patches(&mut self) -> Result<String, JsValue> {
        self.app.take_patches_json().map_err(to_js)
    }

    /// Whether another animation frame is needed.
    #[wasm_bindgen(js_name = needsFrame)]
    pub fn needs_frame(&self) -> bool {
        self.app.needs_frame()
    }

    /// Milliseconds until the next timer, if any.
    #[wasm_bindgen(js_name = nextDeadlineMs)]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        let deadline = self.app.next_deadline()?;
        let remaining = deadline.saturating_sub(self.started.elapsed());
        Some(remaining.as_secs_f64() * 1000.0)
    }
}
