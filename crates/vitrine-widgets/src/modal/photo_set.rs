#![forbid(unsafe_code)]

//! Normalized photo list for one overlay.
//!
//! # Invariants
//!
//! 1. Never empty: an empty source yields `[fallback]`.
//! 2. No duplicates; first occurrence wins and order is preserved.
//! 3. At most `cap` entries (cap is at least 1).
//! 4. Every blank or malformed source entry is replaced by the same
//!    fallback URL, so any number of bad entries collapse into one.

use ahash::AHashSet;

/// Whether `url` can be used as an image source as-is.
///
/// Blank strings and strings with whitespace or control characters inside
/// are rejected; everything else is left for the browser to resolve.
pub fn is_usable_url(url: &str) -> bool {
    !url.is_empty() && !url.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Resolve one source entry: trimmed if usable, else the fallback.
pub fn resolve_photo<'a>(raw: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = raw.trim();
    if is_usable_url(trimmed) {
        trimmed
    } else {
        fallback
    }
}

/// Deduplicated, capped, never-empty list of photo URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSet {
    urls: Vec<String>,
}

impl PhotoSet {
    /// Build from raw source entries.
    pub fn from_sources<I, S>(sources: I, fallback: &str, cap: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cap = cap.max(1);
        let mut seen = AHashSet::new();
        let mut urls = Vec::new();

        for source in sources {
            if urls.len() == cap {
                break;
            }
            let url = resolve_photo(source.as_ref(), fallback);
            if seen.insert(url.to_string()) {
                urls.push(url.to_string());
            }
        }

        if urls.is_empty() {
            urls.push(fallback.to_string());
        }
        Self { urls }
    }

    /// A set holding only the fallback.
    pub fn fallback_only(fallback: &str) -> Self {
        Self {
            urls: vec![fallback.to_string()],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.urls.get(index).map(String::as_str)
    }

    /// The first photo; every set has one.
    pub fn first(&self) -> &str {
        self.urls.first().map_or("", String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }
}
