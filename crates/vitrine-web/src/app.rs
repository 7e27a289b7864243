#![forbid(unsafe_code)]

//! The showcase: hero, grid and overlay sharing one document and one
//! scheduler.
//!
//! # Event routing
//!
//! Every event is offered to the overlay first, then the grid, then the
//! hero; the first widget that handles it wins. Clicks carry their innermost
//! target, and the three widgets own disjoint subtrees, so at most one of
//! them can claim a click.
//!
//! # Time
//!
//! The app's clock starts at zero when it is created. [`ShowcaseApp::frame`]
//! takes the elapsed time since then. Frame tasks run before timers, so a
//! frame requested by a timer (the overlay reveal after a card's press
//! animation) lands on the following frame, as `requestAnimationFrame`
//! would.

use std::time::Duration;

use vitrine_core::{Event, Outcome, Scheduler};
use vitrine_dom::{Document, Mutation};
use vitrine_widgets::{
    CardGrid, GridTask, HeroTask, HeroTransition, InstanceId, ModalController, ModalTask,
};

use crate::catalog::Catalog;
use crate::config::ShowcaseConfig;
use crate::error::ShowcaseError;
use crate::input::InputEvent;

/// Any deferred work in the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTask {
    Modal(ModalTask),
    Grid(GridTask),
    Hero(HeroTask),
}

impl From<ModalTask> for AppTask {
    fn from(task: ModalTask) -> Self {
        Self::Modal(task)
    }
}

impl From<GridTask> for AppTask {
    fn from(task: GridTask) -> Self {
        Self::Grid(task)
    }
}

impl From<HeroTask> for AppTask {
    fn from(task: HeroTask) -> Self {
        Self::Hero(task)
    }
}

/// Host-facing name of an outcome.
pub fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Ignored => "ignored",
        Outcome::Handled => "handled",
        Outcome::PreventDefault => "prevent_default",
    }
}

/// The whole single-page experience.
#[derive(Debug)]
pub struct ShowcaseApp {
    doc: Document,
    sched: Scheduler<AppTask>,
    catalog: Catalog,
    hero: HeroTransition,
    grid: CardGrid,
    modal: ModalController,
    config: ShowcaseConfig,
}

impl ShowcaseApp {
    /// Adopt the host elements named in `config` and render the grid.
    pub fn new(catalog: Catalog, config: ShowcaseConfig) -> Self {
        let mut doc = Document::new();
        let selectors = &config.selectors;
        let body = doc.body();
        doc.add_class(body, "state-hero");

        let screen = doc.adopt("section", &selectors.hero_screen);
        let background = doc.adopt("img", &selectors.hero_background);
        let button = doc.adopt("button", &selectors.explore_button);
        let heading = doc.adopt("h2", &selectors.destination_heading);
        let grid_root = doc.adopt("div", &selectors.hotel_grid);
        let modal_root = doc.adopt("div", &selectors.modal_root);

        let hero = HeroTransition::new(screen, button)
            .background(background)
            .heading(heading)
            .duration(config.hero_transition())
            .fallback_background(config.hero_fallback.clone());

        let mut grid = CardGrid::new(grid_root)
            .fallback_photo(config.fallback_photo.clone())
            .open_delay(config.card_open_delay());
        grid.render(&mut doc, catalog.items());

        let modal = ModalController::new(modal_root).with_config(config.modal_config());

        tracing::info!(items = catalog.len(), "showcase ready");
        Self {
            doc,
            sched: Scheduler::new(),
            catalog,
            hero,
            grid,
            modal,
            config,
        }
    }

    /// Offer an event to each widget in turn.
    pub fn dispatch(&mut self, event: &Event) -> Outcome {
        self.modal
            .handle_event(&mut self.doc, &mut self.sched, event)
            .or_else(|| self.grid.handle_event(&mut self.doc, &mut self.sched, event))
            .or_else(|| self.hero.handle_event(&mut self.doc, &mut self.sched, event))
    }

    /// Handle one encoded host event. Frame ticks advance the clock.
    pub fn dispatch_input(&mut self, input: &InputEvent) -> Outcome {
        if let Some(event) = input.to_event() {
            return self.dispatch(&event);
        }
        match input.frame_time() {
            Some(now) => {
                self.frame(now);
                Outcome::Handled
            }
            None => {
                tracing::warn!(?input, "frame with unusable timestamp ignored");
                Outcome::Ignored
            }
        }
    }

    /// Decode and handle one JSON host event.
    pub fn dispatch_json(&mut self, source: &str) -> Result<Outcome, ShowcaseError> {
        let input = InputEvent::from_json(source)?;
        Ok(self.dispatch_input(&input))
    }

    /// Run the frame tasks queued before this frame, then advance to `now`
    /// and run due timers.
    ///
    /// Frames requested by a timer wait for the next call. Returns how many
    /// tasks ran.
    pub fn frame(&mut self, now: Duration) -> usize {
        let mut ran = 0;
        for task in self.sched.drain_frame() {
            self.run_task(task);
            ran += 1;
        }
        for task in self.sched.advance_to(now) {
            self.run_task(task);
            ran += 1;
        }
        ran
    }

    fn run_task(&mut self, task: AppTask) {
        match task {
            AppTask::Modal(task) => {
                self.modal.run_task(&mut self.doc, task);
            }
            AppTask::Grid(task) => {
                if let Some(index) = self.grid.run_task(&mut self.doc, task) {
                    self.open_item(index);
                }
            }
            AppTask::Hero(task) => {
                self.hero.run_task(&mut self.doc, task);
            }
        }
    }

    /// Open the overlay for catalog item `index` right away.
    pub fn open_item(&mut self, index: usize) -> Option<InstanceId> {
        let item = self.catalog.get(index)?;
        Some(self.modal.open(&mut self.doc, &mut self.sched, item))
    }

    /// Close the overlay, if one is showing.
    pub fn close_overlay(&mut self) -> bool {
        self.modal.close(&mut self.doc, &mut self.sched)
    }

    /// Start the hero transition as if the explore button was clicked.
    pub fn explore(&mut self) -> bool {
        self.hero.start(&mut self.doc, &mut self.sched)
    }

    /// Mutations since the last call.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        self.doc.take_mutations()
    }

    /// Mutations since the last call, as a JSON array.
    pub fn take_patches_json(&mut self) -> Result<String, ShowcaseError> {
        let patches = self.doc.take_mutations();
        serde_json::to_string(&patches).map_err(|e| ShowcaseError::Encode(e.to_string()))
    }

    /// Whether the host should request an animation frame.
    pub fn needs_frame(&self) -> bool {
        self.sched.has_frame_tasks()
    }

    /// When the next timer is due, on the app clock.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.sched.next_deadline()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn scheduler(&self) -> &Scheduler<AppTask> {
        &self.sched
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn hero(&self) -> &HeroTransition {
        &self.hero
    }

    pub fn grid(&self) -> &CardGrid {
        &self.grid
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_core::KeyCode;

    fn app() -> ShowcaseApp {
        let catalog = Catalog::from_json(
            r#"[
                {"name": "Casa", "photos": ["a.jpg", "b.jpg"]},
                {"name": "Finca", "photos": []}
            ]"#,
        )
        .unwrap();
        ShowcaseApp::new(catalog, ShowcaseConfig::default())
    }

    #[test]
    fn task_conversions() {
        let task: AppTask = GridTask::Open(2).into();
        assert_eq!(task, AppTask::Grid(GridTask::Open(2)));
        let task: AppTask = HeroTask::Finish.into();
        assert_eq!(task, AppTask::Hero(HeroTask::Finish));
    }

    #[test]
    fn card_click_opens_overlay_after_delay() {
        let mut app = app();
        let card = app.grid().card_at(1).unwrap();
        assert_eq!(app.dispatch(&Event::Click(card)), Outcome::Handled);
        assert!(!app.modal().is_open());

        app.frame(Duration::from_millis(95));
        assert!(app.modal().is_open());
        let dialog = app.modal().dialog().unwrap();
        assert_eq!(app.document().attr(dialog, "aria-label"), Some("Finca details"));
        assert!(app.needs_frame());

        app.frame(Duration::from_millis(110));
        let backdrop = app.modal().backdrop().unwrap();
        assert!(app.document().has_class(backdrop, "is-open"));
    }

    #[test]
    fn escape_closes_through_dispatch() {
        let mut app = app();
        app.open_item(0);
        app.frame(Duration::from_millis(16));
        assert_eq!(app.dispatch(&Event::key(KeyCode::Escape)), Outcome::Handled);
        assert_eq!(app.next_deadline(), Some(Duration::from_millis(166)));
        app.frame(Duration::from_millis(166));
        assert!(!app.modal().is_open());
    }

    #[test]
    fn json_round_trip_through_the_host_boundary() {
        let mut app = app();
        app.take_mutations();
        let button = app.hero().button();
        let outcome = app
            .dispatch_json(&format!(r#"{{"type":"click","target":{}}}"#, button.raw()))
            .unwrap();
        assert_eq!(outcome, Outcome::Handled);
        let patches = app.take_patches_json().unwrap();
        assert!(patches.contains(r#""op":"add_class""#));
        assert!(patches.contains("is-clicked"));

        assert_eq!(
            app.dispatch_json(r#"{"type":"frame","time_ms":400}"#).unwrap(),
            Outcome::Handled
        );
        assert!(app.hero().is_finished());
        assert!(app.dispatch_json("not json").is_err());
    }

    #[test]
    fn unknown_item_does_not_open() {
        let mut app = app();
        assert_eq!(app.open_item(9), None);
        assert!(!app.modal().is_open());
    }
}
