#![forbid(unsafe_code)]

//! Errors at the host boundary.

use std::fmt;

/// Failure to exchange data with the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowcaseError {
    /// Catalog JSON is malformed or not an array.
    Catalog(String),
    /// Configuration TOML is malformed.
    Config(String),
    /// An input event could not be decoded.
    Input(String),
    /// Output for the host could not be encoded.
    Encode(String),
}

impl fmt::Display for ShowcaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(msg) => write!(f, "invalid catalog: {msg}"),
            Self::Config(msg) => write!(f, "invalid config: {msg}"),
            Self::Input(msg) => write!(f, "invalid input event: {msg}"),
            Self::Encode(msg) => write!(f, "cannot encode patches: {msg}"),
        }
    }
}

impl std::error::Error for ShowcaseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_boundary() {
        assert_eq!(
            ShowcaseError::Catalog("expected an array".into()).to_string(),
            "invalid catalog: expected an array"
        );
        assert_eq!(
            ShowcaseError::Input("unknown type".into()).to_string(),
            "invalid input event: unknown type"
        );
    }
}
