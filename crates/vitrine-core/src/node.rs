#![forbid(unsafe_code)]

//! Stable identity for nodes in the retained document.

use core::fmt;

/// Identifier of a node in a `vitrine_dom::Document`.
///
/// Ids are allocated monotonically and never reused within one document, so
/// a stale id held after its node was removed can never alias a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u32);

impl NodeId {
    /// Create a node id from its raw value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trip_and_display() {
        let id = NodeId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.to_string(), "#42");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&NodeId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: NodeId = serde_json::from_str("7").unwrap();
        assert_eq!(back, NodeId::new(7));
    }
}
