#![forbid(unsafe_code)]

//! Overlay configuration.

use std::time::Duration;

/// Asset substituted for any photo that is missing, malformed, or fails
/// to load.
pub const FALLBACK_PHOTO: &str = "assets/hotels/fallback.svg";

/// How long the exit animation runs before the overlay is torn down.
pub const MODAL_EXIT_DURATION: Duration = Duration::from_millis(150);

/// Upper bound on photos shown for one item.
pub const MAX_PHOTOS: usize = 12;

/// Modal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    pub exit_duration: Duration,
    pub fallback_photo: String,
    pub max_photos: usize,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            exit_duration: MODAL_EXIT_DURATION,
            fallback_photo: FALLBACK_PHOTO.to_string(),
            max_photos: MAX_PHOTOS,
        }
    }
}

impl ModalConfig {
    #[must_use]
    pub fn exit_duration(mut self, duration: Duration) -> Self {
        self.exit_duration = duration;
        self
    }

    #[must_use]
    pub fn fallback_photo(mut self, url: impl Into<String>) -> Self {
        self.fallback_photo = url.into();
        self
    }

    /// Set the photo cap. A cap of zero is treated as one.
    #[must_use]
    pub fn max_photos(mut self, max: usize) -> Self {
        self.max_photos = max.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ModalConfig::default();
        assert_eq!(config.exit_duration, Duration::from_millis(150));
        assert_eq!(config.fallback_photo, "assets/hotels/fallback.svg");
        assert_eq!(config.max_photos, 12);
    }

    #[test]
    fn zero_cap_is_raised_to_one() {
        assert_eq!(ModalConfig::default().max_photos(0).max_photos, 1);
    }
}
