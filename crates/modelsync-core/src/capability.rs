//! Capability tags reported by the local runtime.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Capability marker for structured tool invocation.
pub const TOOLS_CAPABILITY: &str = "tools";

/// Set of capability tags reported for a single model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<String>);

impl CapabilitySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given tag was reported.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Whether the model advertises tool calling.
    pub fn supports_tools(&self) -> bool {
        self.contains(TOOLS_CAPABILITY)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Outcome of asking the runtime about a model's capabilities.
///
/// `Unknown` covers transport failures, timeouts and malformed responses, which
/// are kept apart from a runtime that answered with no `tools` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityLookup {
    /// The runtime answered with this set.
    Reported(CapabilitySet),

    /// The runtime could not be asked or gave an unusable answer.
    Unknown,
}

impl CapabilityLookup {
    /// Whether tool calling is known to be supported. Unknown counts as no.
    pub fn supports_tools(&self) -> bool {
        match self {
            Self::Reported(caps) => caps.supports_tools(),
            Self::Unknown => false,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_tools() {
        let caps: CapabilitySet = ["completion", "tools"].into_iter().collect();
        assert!(caps.supports_tools());
        assert_eq!(caps.len(), 2);

        let caps: CapabilitySet = ["completion", "vision"].into_iter().collect();
        assert!(!caps.supports_tools());
    }

    #[test]
    fn test_unknown_lookup_is_fail_closed() {
        assert!(!CapabilityLookup::Unknown.supports_tools());
        assert!(CapabilityLookup::Unknown.is_unknown());

        let empty = CapabilityLookup::Reported(CapabilitySet::new());
        assert!(!empty.supports_tools());
        assert!(!empty.is_unknown());
    }

    #[test]
    fn test_deserialize_from_json_array() {
        let caps: CapabilitySet = serde_json::from_str(r#"["tools","completion","tools"]"#).unwrap();
        assert_eq!(caps.iter().collect::<Vec<_>>(), vec!["completion", "tools"]);
    }
}
