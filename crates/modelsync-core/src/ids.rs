//! Newtype wrapper for model identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a model as reported by the local runtime (e.g. `llama3.2:3b`).
///
/// The value is opaque apart from the optional `:`-delimited tag suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a new ModelId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier with the tag suffix stripped (`qwen2.5-coder:7b` -> `qwen2.5-coder`).
    pub fn base_name(&self) -> &str {
        match self.0.split_once(':') {
            Some((base, _)) => base,
            None => &self.0,
        }
    }

    /// Tag suffix after the first `:`, if any.
    pub fn tag(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, tag)| tag)
    }

    /// Fully-qualified key under a provider namespace (`ollama/llama3.2:3b`).
    pub fn qualified(&self, provider: &str) -> String {
        format!("{}/{}", provider, self.0)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
