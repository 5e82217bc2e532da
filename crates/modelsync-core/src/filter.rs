//! Tool-capability filtering of local models.
//!
//! The blocklist check runs before any capability lookup; a blocklisted model
//! is rejected no matter what the runtime would report for it.

use std::collections::HashSet;

use crate::capability::CapabilityLookup;
use crate::ids::ModelId;

/// Models that report `tools` but return tool calls as JSON text in the
/// content field instead of a `tool_calls` array.
pub const BROKEN_TOOL_MODELS: &[&str] = &["mistral-small", "qwen2.5-coder"];

/// Set of model base names excluded regardless of reported capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blocklist {
    base_names: HashSet<String>,
}

impl Default for Blocklist {
    fn default() -> Self {
        BROKEN_TOOL_MODELS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Blocklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            base_names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Blocklist {
    /// Whether the model's base name is blocklisted.
    pub fn contains(&self, id: &ModelId) -> bool {
        self.base_names.contains(id.base_name())
    }
}

/// Decision for a single non-blocklisted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Reported the tools capability.
    Accept,

    /// Answered without the tools capability.
    NoTools,

    /// Capability could not be determined; excluded like `NoTools`.
    Unverified,
}

impl Verdict {
    pub fn from_lookup(lookup: &CapabilityLookup) -> Self {
        match lookup {
            CapabilityLookup::Unknown => Self::Unverified,
            lookup if lookup.supports_tools() => Self::Accept,
            CapabilityLookup::Reported(_) => Self::NoTools,
        }
    }
}

/// Partitions produced by the tool-capability filter, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Models that qualify for the provider section.
    pub accepted: Vec<ModelId>,

    /// Models without the tools capability, including unverified ones.
    pub no_tools: Vec<ModelId>,

    /// Models whose base name is blocklisted.
    pub blocklisted: Vec<ModelId>,

    /// Subset of `no_tools` whose capability lookup failed.
    pub unverified: Vec<ModelId>,
}

impl FilterOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a blocklisted model.
    pub fn reject_blocklisted(&mut self, id: ModelId) {
        self.blocklisted.push(id);
    }

    /// Record a model with the verdict derived from its capability lookup.
    pub fn record(&mut self, id: ModelId, lookup: &CapabilityLookup) -> Verdict {
        let verdict = Verdict::from_lookup(lookup);
        match verdict {
            Verdict::Accept => self.accepted.push(id),
            Verdict::NoTools => self.no_tools.push(id),
            Verdict::Unverified => {
                self.unverified.push(id.clone());
                self.no_tools.push(id);
            }
        }
        verdict
    }

    /// Human-readable rejection lines, empty partitions omitted.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.no_tools.is_empty() {
            lines.push(format!(
                "Skipped (no tools capability): {}",
                join_ids(&self.no_tools)
            ));
        }
        if !self.blocklisted.is_empty() {
            lines.push(format!(
                "Skipped (broken tool implementation): {}",
                join_ids(&self.blocklisted)
            ));
        }
        lines
    }
}

/// Comma-separated list of model ids.
pub fn join_ids(ids: &[ModelId]) -> String {
    ids.iter()
        .map(ModelId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
