#![forbid(unsafe_code)]

//! Lenient catalog loading.
//!
//! Catalogs are hand-edited JSON arrays of objects. Loading only shapes the
//! data into [`DisplayItem`]s; ratings and photos are normalized later, at
//! render time.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Not JSON | Syntax error | `ShowcaseError::Catalog` |
//! | Not an array | Top-level object, string, ... | `ShowcaseError::Catalog` |
//! | Non-object entry | `null`, number, ... in the array | Entry skipped with a warning |
//! | Wrong field type | e.g. `"photos": "a.jpg"` | Field treated as empty/missing |

use serde_json::{Map, Value};
use vitrine_widgets::{DisplayItem, RatingInput};

use crate::error::ShowcaseError;

/// The items shown in the grid, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<DisplayItem>,
}

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k)).filter(|v| !v.is_null())
}

fn string(obj: &Map<String, Value>, keys: &[&str]) -> String {
    field(obj, keys)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn rating(obj: &Map<String, Value>, keys: &[&str]) -> RatingInput {
    match field(obj, keys) {
        Some(Value::Number(n)) => n.as_f64().map_or(RatingInput::Missing, RatingInput::Number),
        Some(Value::String(s)) => RatingInput::Text(s.clone()),
        _ => RatingInput::Missing,
    }
}

fn rate(obj: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    let value = field(obj, keys)?.as_f64()?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value.round() as u32)
}

/// Photos keep their positions; non-string entries become blank so the
/// photo set replaces them with the fallback.
fn photos(obj: &Map<String, Value>) -> Vec<String> {
    match field(obj, &["photos"]) {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

fn amenities(obj: &Map<String, Value>) -> Vec<String> {
    match field(obj, &["amenities"]) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn item_from_object(obj: &Map<String, Value>) -> DisplayItem {
    let social = string(obj, &["socialUrl", "social_url", "instagram"]);
    DisplayItem {
        name: string(obj, &["name"]),
        location: string(obj, &["location"]),
        description: string(obj, &["description"]),
        website_url: string(obj, &["website", "websiteUrl", "website_url"]),
        map_url: string(obj, &["googleMapsUrl", "mapUrl", "map_url"]),
        social_url: (!social.is_empty()).then_some(social),
        photos: photos(obj),
        amenities: amenities(obj),
        price_tier: rating(obj, &["priceTier", "price_tier"]),
        seclusion: rating(obj, &["seclusion"]),
        activity: rating(obj, &["activity"]),
        romance: rating(obj, &["romance"]),
        nightly_rate: rate(obj, &["nightlyRate", "nightly_rate", "marchPrice"]),
    }
}

impl Catalog {
    pub fn new(items: Vec<DisplayItem>) -> Self {
        Self { items }
    }

    /// Parse a JSON catalog.
    pub fn from_json(source: &str) -> Result<Self, ShowcaseError> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| ShowcaseError::Catalog(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Shape an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, ShowcaseError> {
        let Value::Array(entries) = value else {
            return Err(ShowcaseError::Catalog("expected a JSON array".to_string()));
        };
        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match entry {
                Value::Object(obj) => items.push(item_from_object(obj)),
                other => {
                    tracing::warn!(index, kind = json_kind(other), "skipping non-object catalog entry");
                }
            }
        }
        tracing::debug!(items = items.len(), "catalog loaded");
        Ok(Self { items })
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&DisplayItem> {
        self.items.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<DisplayItem> {
        self.items
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
