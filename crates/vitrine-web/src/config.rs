#![forbid(unsafe_code)]

//! Showcase configuration.
//!
//! Every field is optional in TOML; missing fields keep their defaults.
//!
//! ```toml
//! modal_exit_ms = 150
//! card_open_delay_ms = 95
//! max_photos = 12
//!
//! [selectors]
//! modal_root = "#modal-root"
//! ```

use std::time::Duration;

use serde::Deserialize;
use vitrine_widgets::hero::{HERO_FALLBACK, HERO_TRANSITION_DURATION};
use vitrine_widgets::modal::{FALLBACK_PHOTO, MAX_PHOTOS, MODAL_EXIT_DURATION};
use vitrine_widgets::{CARD_OPEN_DELAY, ModalConfig};

use crate::error::ShowcaseError;

/// Host selectors for the elements the app adopts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub hero_screen: String,
    pub hero_background: String,
    pub explore_button: String,
    pub destination_heading: String,
    pub hotel_grid: String,
    pub modal_root: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            hero_screen: "#hero-screen".to_string(),
            hero_background: "#hero-screen .hero-background".to_string(),
            explore_button: "#explore-button".to_string(),
            destination_heading: "#grid-screen .destination-header h2".to_string(),
            hotel_grid: "#hotel-grid".to_string(),
            modal_root: "#modal-root".to_string(),
        }
    }
}

/// Timings, assets and selectors for [`ShowcaseApp`](crate::ShowcaseApp).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    pub modal_exit_ms: u64,
    pub card_open_delay_ms: u64,
    pub hero_transition_ms: u64,
    pub fallback_photo: String,
    pub hero_fallback: String,
    pub max_photos: usize,
    pub selectors: Selectors,
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            modal_exit_ms: millis(MODAL_EXIT_DURATION),
            card_open_delay_ms: millis(CARD_OPEN_DELAY),
            hero_transition_ms: millis(HERO_TRANSITION_DURATION),
            fallback_photo: FALLBACK_PHOTO.to_string(),
            hero_fallback: HERO_FALLBACK.to_string(),
            max_photos: MAX_PHOTOS,
            selectors: Selectors::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Parse TOML, filling unspecified fields with defaults.
    pub fn from_toml(source: &str) -> Result<Self, ShowcaseError> {
        toml::from_str(source).map_err(|e| ShowcaseError::Config(e.to_string()))
    }

    pub fn modal_exit(&self) -> Duration {
        Duration::from_millis(self.modal_exit_ms)
    }

    pub fn card_open_delay(&self) -> Duration {
        Duration::from_millis(self.card_open_delay_ms)
    }

    pub fn hero_transition(&self) -> Duration {
        Duration::from_millis(self.hero_transition_ms)
    }

    /// The overlay's share of the configuration.
    pub fn modal_config(&self) -> ModalConfig {
        ModalConfig::default()
            .exit_duration(self.modal_exit())
            .fallback_photo(self.fallback_photo.clone())
            .max_photos(self.max_photos)
    }
}
