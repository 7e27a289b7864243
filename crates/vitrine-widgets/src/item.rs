#![forbid(unsafe_code)]

//! The record a card hands to the overlay.

/// A loosely-typed rating as it arrives from catalog data.
///
/// Catalog files are hand-edited, so a rating may be a number, a numeric
/// string, garbage, or absent. Normalization happens at render time
/// (`modal::content::normalize_rating`), never at load time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RatingInput {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<f64> for RatingInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RatingInput {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RatingInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<f64>> for RatingInput {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

/// A selectable item: one card in the grid, one overlay when opened.
///
/// Owned by the caller; widgets only read it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayItem {
    pub name: String,
    pub location: String,
    pub description: String,
    pub website_url: String,
    pub map_url: String,
    pub social_url: Option<String>,
    /// Photo URLs in display order. Entries may be blank or malformed.
    pub photos: Vec<String>,
    pub amenities: Vec<String>,
    pub price_tier: RatingInput,
    pub seclusion: RatingInput,
    pub activity: RatingInput,
    pub romance: RatingInput,
    /// Estimated nightly rate in whole dollars.
    pub nightly_rate: Option<u32>,
}

impl DisplayItem {
    /// Create an item with a name and everything else empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn website_url(mut self, url: impl Into<String>) -> Self {
        self.website_url = url.into();
        self
    }

    #[must_use]
    pub fn map_url(mut self, url: impl Into<String>) -> Self {
        self.map_url = url.into();
        self
    }

    #[must_use]
    pub fn social_url(mut self, url: impl Into<String>) -> Self {
        self.social_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn photos<I, S>(mut self, photos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.photos = photos.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    /// Set all four ratings: price tier, seclusion, activity, romance.
    #[must_use]
    pub fn ratings(
        mut self,
        price_tier: impl Into<RatingInput>,
        seclusion: impl Into<RatingInput>,
        activity: impl Into<RatingInput>,
        romance: impl Into<RatingInput>,
    ) -> Self {
        self.price_tier = price_tier.into();
        self.seclusion = seclusion.into();
        self.activity = activity.into();
        self.romance = romance.into();
        self
    }

    #[must_use]
    pub fn nightly_rate(mut self, rate: u32) -> Self {
        self.nightly_rate = Some(rate);
        self
    }

    /// The social link when it is present and non-blank.
    pub fn social_link(&self) -> Option<&str> {
        self.social_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
