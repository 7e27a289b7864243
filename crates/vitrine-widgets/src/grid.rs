#![forbid(unsafe_code)]

//! Card grid.
//!
//! One `button.hotel-card` per item. Selecting a card plays a short press
//! animation (`is-opening`) and, once it has run, reports which item was
//! chosen so the owner can open the overlay.

use std::time::Duration;

use vitrine_core::{Event, NodeId, Outcome, Scheduler, TaskHandle};
use vitrine_dom::Document;

use crate::item::DisplayItem;
use crate::modal::{FALLBACK_PHOTO, resolve_photo};

/// Class present while a selected card plays its press animation.
pub const OPENING_CLASS: &str = "is-opening";

/// Delay between selecting a card and opening its overlay.
pub const CARD_OPEN_DELAY: Duration = Duration::from_millis(95);

/// Deferred grid work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridTask {
    /// Press animation finished for the card at this index.
    Open(usize),
}

#[derive(Debug, Clone, Copy)]
struct Card {
    root: NodeId,
    image: NodeId,
}

/// Cards rendered into a container.
#[derive(Debug)]
pub struct CardGrid {
    container: NodeId,
    cards: Vec<Card>,
    fallback: String,
    open_delay: Duration,
}

impl CardGrid {
    pub fn new(container: NodeId) -> Self {
        Self {
            container,
            cards: Vec::new(),
            fallback: FALLBACK_PHOTO.to_string(),
            open_delay: CARD_OPEN_DELAY,
        }
    }

    #[must_use]
    pub fn fallback_photo(mut self, url: impl Into<String>) -> Self {
        self.fallback = url.into();
        self
    }

    #[must_use]
    pub fn open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = delay;
        self
    }

    /// Replace the container's contents with one card per item.
    pub fn render(&mut self, doc: &mut Document, items: &[DisplayItem]) {
        doc.clear_children(self.container);
        self.cards.clear();

        for item in items {
            let card = self.build_card(doc, item);
            doc.append_child(self.container, card.root);
            self.cards.push(card);
        }
        tracing::debug!(cards = self.cards.len(), "card grid rendered");
    }

    fn build_card(&self, doc: &mut Document, item: &DisplayItem) -> Card {
        let root = doc.create_element("button");
        doc.set_attr(root, "type", "button");
        doc.add_class(root, "hotel-card");
        doc.set_attr(root, "aria-label", format!("Open details for {}", item.name));

        let src = item
            .photos
            .first()
            .map_or(self.fallback.as_str(), |p| resolve_photo(p, &self.fallback));
        let image = doc.create_element("img");
        doc.add_class(image, "hotel-card-photo");
        doc.set_attr(image, "src", src);
        doc.set_attr(image, "alt", format!("{} preview", item.name));
        doc.set_attr(image, "loading", "lazy");
        doc.set_attr(image, "decoding", "async");

        let body = doc.create_element("div");
        doc.add_class(body, "hotel-card-body");
        let name = doc.create_element("h3");
        doc.add_class(name, "hotel-name");
        doc.set_text(name, item.name.as_str());
        let location = doc.create_element("p");
        doc.add_class(location, "hotel-location");
        doc.set_text(location, format!("◉ {}", item.location));
        doc.append_children(body, &[name, location]);

        doc.append_children(root, &[image, body]);
        Card { root, image }
    }

    /// Number of rendered cards.
    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_at(&self, index: usize) -> Option<NodeId> {
        self.cards.get(index).map(|c| c.root)
    }

    pub fn image_at(&self, index: usize) -> Option<NodeId> {
        self.cards.get(index).map(|c| c.image)
    }

    /// Index of the card containing `target`.
    pub fn card_index(&self, doc: &Document, target: NodeId) -> Option<usize> {
        self.cards.iter().position(|c| doc.contains(c.root, target))
    }

    /// Start the press animation on card `index` and schedule its open.
    pub fn select<T>(
        &mut self,
        doc: &mut Document,
        sched: &mut Scheduler<T>,
        index: usize,
    ) -> Option<TaskHandle>
    where
        T: From<GridTask>,
    {
        let card = self.cards.get(index)?;
        doc.add_class(card.root, OPENING_CLASS);
        tracing::trace!(index, "card selected");
        Some(sched.schedule_after(self.open_delay, GridTask::Open(index)))
    }

    /// Finish a press animation. Returns the index of the item to open.
    pub fn run_task(&mut self, doc: &mut Document, task: GridTask) -> Option<usize> {
        match task {
            GridTask::Open(index) => {
                let card = self.cards.get(index)?;
                doc.remove_class(card.root, OPENING_CLASS);
                Some(index)
            }
        }
    }

    /// Swap a failed preview to the fallback. Returns `false` for other
    /// nodes or a preview already showing the fallback.
    pub fn handle_image_error(&self, doc: &mut Document, node: NodeId) -> bool {
        if !self.cards.iter().any(|c| c.image == node)
            || doc.attr(node, "src") == Some(self.fallback.as_str())
        {
            return false;
        }
        doc.set_attr(node, "src", self.fallback.as_str())
    }

    /// Route clicks on cards and image failures on previews.
    pub fn handle_event<T>(
        &mut self,
        doc: &mut Document,
        sched: &mut Scheduler<T>,
        event: &Event,
    ) -> Outcome
    where
        T: From<GridTask>,
    {
        match *event {
            Event::Click(target) => match self.card_index(doc, target) {
                Some(index) => {
                    self.select(doc, sched, index);
                    Outcome::Handled
                }
                None => Outcome::Ignored,
            },
            Event::ImageError(node) if self.handle_image_error(doc, node) => Outcome::Handled,
            _ => Outcome::Ignored,
        }
    }

    #[inline]
    pub fn container(&self) -> NodeId {
        self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items() -> Vec<DisplayItem> {
        vec![
            DisplayItem::new("Casa").location("Tulum").photos(["casa.jpg"]),
            DisplayItem::new("Finca").location("Oaxaca"),
        ]
    }

    fn setup() -> (Document, Scheduler<GridTask>, CardGrid) {
        let mut doc = Document::new();
        let container = doc.adopt("div", "#hotel-grid");
        (doc, Scheduler::new(), CardGrid::new(container))
    }

    #[test]
    fn render_builds_one_card_per_item() {
        let (mut doc, _, mut grid) = setup();
        grid.render(&mut doc, &items());
        assert_eq!(grid.len(), 2);
        assert_eq!(doc.children(grid.container()).len(), 2);

        let card = grid.card_at(0).unwrap();
        assert_eq!(doc.attr(card, "aria-label"), Some("Open details for Casa"));
        assert_eq!(doc.text_content(card), "Casa◉ Tulum");
        assert_eq!(doc.attr(grid.image_at(0).unwrap(), "src"), Some("casa.jpg"));
        assert_eq!(doc.attr(grid.image_at(0).unwrap(), "alt"), Some("Casa preview"));
        assert_eq!(doc.attr(grid.image_at(1).unwrap(), "src"), Some(FALLBACK_PHOTO));
    }

    #[test]
    fn rerender_replaces_cards() {
        let (mut doc, _, mut grid) = setup();
        grid.render(&mut doc, &items());
        let old = grid.card_at(0).unwrap();
        grid.render(&mut doc, &items()[..1]);
        assert!(!doc.exists(old));
        assert_eq!(grid.len(), 1);
        assert_eq!(doc.children(grid.container()).len(), 1);
    }

    #[test]
    fn click_inside_card_selects_after_delay() {
        let (mut doc, mut sched, mut grid) = setup();
        grid.render(&mut doc, &items());
        let card = grid.card_at(1).unwrap();
        let name = doc.first_by_class(card, "hotel-name").unwrap();

        let outcome = grid.handle_event(&mut doc, &mut sched, &Event::Click(name));
        assert_eq!(outcome, Outcome::Handled);
        assert!(doc.has_class(card, OPENING_CLASS));
        assert!(sched.advance(Duration::from_millis(94)).is_empty());

        let tasks = sched.advance(Duration::from_millis(1));
        assert_eq!(tasks, vec![GridTask::Open(1)]);
        assert_eq!(grid.run_task(&mut doc, tasks[0]), Some(1));
        assert!(!doc.has_class(card, OPENING_CLASS));
    }

    #[test]
    fn click_outside_cards_is_ignored() {
        let (mut doc, mut sched, mut grid) = setup();
        grid.render(&mut doc, &items());
        let outcome = grid.handle_event(&mut doc, &mut sched, &Event::Click(grid.container()));
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn broken_preview_falls_back_once() {
        let (mut doc, mut sched, mut grid) = setup();
        grid.render(&mut doc, &items());
        let image = grid.image_at(0).unwrap();
        let ev = Event::ImageError(image);
        assert_eq!(grid.handle_event(&mut doc, &mut sched, &ev), Outcome::Handled);
        assert_eq!(doc.attr(image, "src"), Some(FALLBACK_PHOTO));
        assert_eq!(grid.handle_event(&mut doc, &mut sched, &ev), Outcome::Ignored);
    }
}
