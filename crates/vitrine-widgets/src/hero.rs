#![forbid(unsafe_code)]

//! Hero screen and its one-way transition into the grid.
//!
//! # Invariants
//!
//! - The transition runs at most once; later starts are no-ops.
//! - The hero is hidden from assistive tech (`aria-hidden`) only after the
//!   exit animation, and focus moves to the destination heading then.

use std::time::Duration;

use vitrine_core::{Event, NodeId, Outcome, Scheduler};
use vitrine_dom::Document;

/// Length of the hero exit animation.
pub const HERO_TRANSITION_DURATION: Duration = Duration::from_millis(400);

/// Hero background used when the configured image fails to load.
pub const HERO_FALLBACK: &str = "assets/hero-bg.svg";

/// Deferred hero work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroTask {
    /// Exit animation done.
    Finish,
}

/// The hero screen's transition controller.
#[derive(Debug)]
pub struct HeroTransition {
    screen: NodeId,
    button: NodeId,
    background: Option<NodeId>,
    heading: Option<NodeId>,
    duration: Duration,
    fallback: String,
    started: bool,
    finished: bool,
}

impl HeroTransition {
    pub fn new(screen: NodeId, button: NodeId) -> Self {
        Self {
            screen,
            button,
            background: None,
            heading: None,
            duration: HERO_TRANSITION_DURATION,
            fallback: HERO_FALLBACK.to_string(),
            started: false,
            finished: false,
        }
    }

    /// Background image that falls back on load failure.
    #[must_use]
    pub fn background(mut self, node: NodeId) -> Self {
        self.background = Some(node);
        self
    }

    /// Heading that receives focus once the grid is showing.
    #[must_use]
    pub fn heading(mut self, node: NodeId) -> Self {
        self.heading = Some(node);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn fallback_background(mut self, url: impl Into<String>) -> Self {
        self.fallback = url.into();
        self
    }

    /// Begin leaving the hero. Returns `false` if already started.
    pub fn start<T>(&mut self, doc: &mut Document, sched: &mut Scheduler<T>) -> bool
    where
        T: From<HeroTask>,
    {
        if self.started {
            return false;
        }
        self.started = true;
        doc.add_class(self.button, "is-clicked");
        doc.add_class(self.screen, "is-exiting");
        let body = doc.body();
        doc.remove_class(body, "state-hero");
        doc.add_class(body, "state-grid");
        sched.schedule_after(self.duration, HeroTask::Finish);
        tracing::debug!("hero transition started");
        true
    }

    pub fn run_task(&mut self, doc: &mut Document, task: HeroTask) -> bool {
        match task {
            HeroTask::Finish => {
                if !self.started || self.finished {
                    return false;
                }
                self.finished = true;
                doc.set_attr(self.screen, "aria-hidden", "true");
                if let Some(heading) = self.heading {
                    doc.set_attr(heading, "tabindex", "-1");
                    doc.focus(heading);
                }
                true
            }
        }
    }

    pub fn handle_event<T>(
        &mut self,
        doc: &mut Document,
        sched: &mut Scheduler<T>,
        event: &Event,
    ) -> Outcome
    where
        T: From<HeroTask>,
    {
        match *event {
            Event::Click(target) if doc.contains(self.button, target) => {
                self.start(doc, sched);
                Outcome::Handled
            }
            Event::ImageError(node)
                if self.background == Some(node)
                    && doc.attr(node, "src") != Some(self.fallback.as_str()) =>
            {
                doc.set_attr(node, "src", self.fallback.as_str());
                Outcome::Handled
            }
            _ => Outcome::Ignored,
        }
    }

    #[inline]
    pub fn screen(&self) -> NodeId {
        self.screen
    }

    #[inline]
    pub fn button(&self) -> NodeId {
        self.button
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
