#![forbid(unsafe_code)]

//! Overlay body: title, links, description, amenities and ratings.
//!
//! Everything here is construction only. The builders create detached
//! subtrees; the lifecycle manager decides where they go.

use vitrine_core::NodeId;
use vitrine_dom::Document;

use crate::item::{DisplayItem, RatingInput};

/// Segments in every rating bar.
pub const RATING_SEGMENTS: u8 = 5;

const EXTERNAL_REL: &str = "noreferrer noopener";

/// Coerce a loose rating to a whole number in `0..=5`.
///
/// Numbers are used as-is, text is parsed after trimming (empty text is
/// zero), and anything unparsable, NaN, or missing is zero. The value is
/// floored, then clamped.
pub fn normalize_rating(input: &RatingInput) -> u8 {
    let value = match input {
        RatingInput::Number(n) => *n,
        RatingInput::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        RatingInput::Missing => 0.0,
    };
    if value.is_nan() {
        return 0;
    }
    value.floor().clamp(0.0, f64::from(RATING_SEGMENTS)) as u8
}

/// The four rating bars, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingKind {
    Price,
    Seclusion,
    Activity,
    Romance,
}

impl RatingKind {
    pub const ALL: [Self; 4] = [Self::Price, Self::Seclusion, Self::Activity, Self::Romance];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "PRICE",
            Self::Seclusion => "SECLUSION",
            Self::Activity => "ACTIVITY",
            Self::Romance => "ROMANCE",
        }
    }

    /// Extra class carried by filled segments.
    pub const fn accent_class(self) -> Option<&'static str> {
        match self {
            Self::Activity => Some("activity"),
            _ => None,
        }
    }

    pub fn value(self, item: &DisplayItem) -> &RatingInput {
        match self {
            Self::Price => &item.price_tier,
            Self::Seclusion => &item.seclusion,
            Self::Activity => &item.activity,
            Self::Romance => &item.romance,
        }
    }
}

/// Detached subtrees making up the overlay body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSections {
    /// `h3.modal-title` with the website link inside.
    pub title: NodeId,
    /// `div.modal-location-row`: map link and secondary link.
    pub links: NodeId,
    pub description: NodeId,
    /// Present only when the item has a nightly rate.
    pub rate_note: Option<NodeId>,
    pub amenities: NodeId,
    pub stats: NodeId,
}

impl ContentSections {
    /// Sections following the title bar and stage, in mount order.
    pub fn body(&self) -> Vec<NodeId> {
        let mut nodes = vec![self.links, self.description];
        nodes.extend(self.rate_note);
        nodes.push(self.amenities);
        nodes.push(self.stats);
        nodes
    }
}

fn external_link(doc: &mut Document, classes: &str, href: &str, text: &str) -> NodeId {
    let a = doc.create_element("a");
    doc.add_classes(a, classes);
    doc.set_attr(a, "href", href);
    doc.set_attr(a, "target", "_blank");
    doc.set_attr(a, "rel", EXTERNAL_REL);
    doc.set_text(a, text);
    a
}

fn text_element(doc: &mut Document, tag: &str, class: &str, text: &str) -> NodeId {
    let node = doc.create_element(tag);
    if !class.is_empty() {
        doc.add_class(node, class);
    }
    doc.set_text(node, text);
    node
}

/// `h3.modal-title > a`.
pub fn build_title(doc: &mut Document, item: &DisplayItem) -> NodeId {
    let heading = doc.create_element("h3");
    doc.add_class(heading, "modal-title");
    let link = external_link(doc, "modal-title-link", &item.website_url, &item.name);
    doc.append_child(heading, link);
    heading
}

/// Map link plus either the social or the website link.
pub fn build_links(doc: &mut Document, item: &DisplayItem) -> NodeId {
    let row = doc.create_element("div");
    doc.add_class(row, "modal-location-row");

    let map = external_link(
        doc,
        "modal-link location",
        &item.map_url,
        &format!("◉ {}", item.location),
    );
    let secondary = match item.social_link() {
        Some(url) => external_link(doc, "modal-link social", url, "SOCIAL ↗"),
        None => external_link(doc, "modal-link website", &item.website_url, "WEBSITE ↗"),
    };
    doc.append_children(row, &[map, secondary]);
    row
}

/// Text for the nightly-rate estimate.
pub fn rate_note_text(rate: u32) -> String {
    format!("EST. NIGHTLY RATE: ~${rate}/NT")
}

/// One `p.amenity-item` row: bullet then label.
pub fn build_amenity(doc: &mut Document, label: &str) -> NodeId {
    let row = doc.create_element("p");
    doc.add_class(row, "amenity-item");
    let bullet = text_element(doc, "span", "amenity-bullet", "■");
    let text = text_element(doc, "span", "", label);
    doc.append_children(row, &[bullet, text]);
    row
}

/// One `div.stat`: label and a bar of exactly five segments.
pub fn build_rating(doc: &mut Document, kind: RatingKind, value: &RatingInput) -> NodeId {
    let stat = doc.create_element("div");
    doc.add_class(stat, "stat");
    let label = text_element(doc, "span", "stat-label", kind.label());
    let bar = doc.create_element("div");
    doc.add_class(bar, "stat-bar");

    let filled = normalize_rating(value);
    for segment in 0..RATING_SEGMENTS {
        let block = doc.create_element("div");
        doc.add_class(block, "stat-block");
        if segment < filled {
            doc.add_class(block, "filled");
            if let Some(accent) = kind.accent_class() {
                doc.add_class(block, accent);
            }
        } else {
            doc.add_class(block, "empty");
        }
        doc.append_child(bar, block);
    }

    doc.append_children(stat, &[label, bar]);
    stat
}

/// Build every content section for `item`.
pub fn build_content(doc: &mut Document, item: &DisplayItem) -> ContentSections {
    let title = build_title(doc, item);
    let links = build_links(doc, item);
    let description = text_element(doc, "p", "modal-description", &item.description);
    let rate_note = item
        .nightly_rate
        .map(|rate| text_element(doc, "p", "modal-price-note", &rate_note_text(rate)));

    let amenities = doc.create_element("section");
    doc.add_class(amenities, "modal-amenities");
    doc.set_attr(amenities, "aria-label", "Amenities");
    for label in &item.amenities {
        let row = build_amenity(doc, label);
        doc.append_child(amenities, row);
    }

    let stats = doc.create_element("section");
    doc.add_class(stats, "modal-stats");
    doc.set_attr(stats, "aria-label", "Ratings");
    let grid = doc.create_element("div");
    doc.add_class(grid, "stat-grid");
    for kind in RatingKind::ALL {
        let stat = build_rating(doc, kind, kind.value(item));
        doc.append_child(grid, stat);
    }
    doc.append_child(stats, grid);

    ContentSections {
        title,
        links,
        description,
        rate_note,
        amenities,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled(doc: &Document, stat: NodeId) -> usize {
        doc.find_by_class(stat, "filled").len()
    }

    #[test]
    fn rating_table() {
        let cases: [(RatingInput, u8); 7] = [
            (RatingInput::Number(-5.0), 0),
            (RatingInput::Number(0.0), 0),
            (RatingInput::Number(2.7), 2),
            (RatingInput::Number(5.0), 5),
            (RatingInput::Number(9.0), 5),
            (RatingInput::from("abc"), 0),
            (RatingInput::Missing, 0),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_rating(&input), expected, "{input:?}");
        }
    }

    #[test]
    fn rating_edge_inputs() {
        assert_eq!(normalize_rating(&RatingInput::Number(f64::NAN)), 0);
        assert_eq!(normalize_rating(&RatingInput::Number(f64::INFINITY)), 5);
        assert_eq!(normalize_rating(&RatingInput::Number(f64::NEG_INFINITY)), 0);
        assert_eq!(normalize_rating(&RatingInput::from(" 4 ")), 4);
        assert_eq!(normalize_rating(&RatingInput::from("3.9")), 3);
        assert_eq!(normalize_rating(&RatingInput::from("")), 0);
        assert_eq!(normalize_rating(&RatingInput::from("   ")), 0);
    }

    #[test]
    fn rating_bar_has_five_segments() {
        let mut doc = Document::new();
        let stat = build_rating(&mut doc, RatingKind::Price, &RatingInput::Number(3.0));
        let bar = doc.children(stat)[1];
        assert_eq!(doc.children(bar).len(), 5);
        assert_eq!(filled(&doc, stat), 3);
        assert_eq!(doc.find_by_class(stat, "empty").len(), 2);
        assert!(doc.find_by_class(stat, "activity").is_empty());
    }

    #[test]
    fn activity_segments_carry_accent() {
        let mut doc = Document::new();
        let stat = build_rating(&mut doc, RatingKind::Activity, &RatingInput::Number(2.0));
        assert_eq!(doc.find_by_class(stat, "activity").len(), 2);
        assert_eq!(doc.text_content(stat), "ACTIVITY");
    }

    #[test]
    fn secondary_link_prefers_social() {
        let mut doc = Document::new();
        let item = DisplayItem::new("Casa")
            .website_url("https://casa.example")
            .social_url("https://instagram.com/casa");
        let row = build_links(&mut doc, &item);
        let social = doc.first_by_class(row, "social").unwrap();
        assert_eq!(doc.attr(social, "href"), Some("https://instagram.com/casa"));
        assert_eq!(doc.text(social), Some("SOCIAL ↗"));
        assert!(doc.first_by_class(row, "website").is_none());
    }

    #[test]
    fn blank_social_falls_back_to_website() {
        let mut doc = Document::new();
        let item = DisplayItem::new("Casa")
            .location("Tulum")
            .map_url("https://maps.example/casa")
            .website_url("https://casa.example")
            .social_url("  ");
        let row = build_links(&mut doc, &item);
        let site = doc.first_by_class(row, "website").unwrap();
        assert_eq!(doc.text(site), Some("WEBSITE ↗"));
        assert_eq!(doc.attr(site, "rel"), Some("noreferrer noopener"));
        assert_eq!(doc.attr(site, "target"), Some("_blank"));
        let map = doc.first_by_class(row, "location").unwrap();
        assert_eq!(doc.text(map), Some("◉ Tulum"));
        assert_eq!(doc.attr(map, "href"), Some("https://maps.example/casa"));
    }

    #[test]
    fn content_sections_in_order() {
        let mut doc = Document::new();
        let item = DisplayItem::new("Casa")
            .description("Quiet.")
            .amenities(["Pool", "Spa"])
            .ratings(1, 2, 3, 4)
            .nightly_rate(380);
        let c = build_content(&mut doc, &item);

        assert_eq!(doc.text_content(c.title), "Casa");
        assert_eq!(doc.text(c.description), Some("Quiet."));
        let note = c.rate_note.unwrap();
        assert_eq!(doc.text(note), Some("EST. NIGHTLY RATE: ~$380/NT"));
        assert_eq!(doc.text_content(c.amenities), "■Pool■Spa");
        assert_eq!(
            c.body(),
            vec![c.links, c.description, note, c.amenities, c.stats]
        );

        let stats = doc.find_by_class(c.stats, "stat");
        let counts: Vec<usize> = stats.iter().map(|s| filled(&doc, *s)).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
    }

    #[test]
    fn rate_note_omitted_without_rate() {
        let mut doc = Document::new();
        let c = build_content(&mut doc, &DisplayItem::new("Casa"));
        assert_eq!(c.rate_note, None);
        assert!(doc.first_by_class(c.stats, "filled").is_none());
    }
}
