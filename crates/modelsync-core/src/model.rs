//! Provider model entries, aliases and remote catalog rows.

use serde::{Deserialize, Serialize};

use crate::ids::ModelId;

/// Substrings of a lowercased model id that mark reasoning-specialized models.
pub const REASONING_MARKERS: &[&str] = &["deepseek-r1", "phi4-reasoning", "reasoning"];

/// Human-readable name derived from a model id.
///
/// `:` and `-` become spaces, then every run of letters is title-cased: a
/// letter is upper-cased when it follows a non-letter (or starts the string)
/// and lower-cased otherwise. `llama3.2:3b` becomes `Llama3.2 3B`.
///
/// A word's first letter goes through [`char::to_uppercase`], not Unicode
/// titlecase, since `std` has no titlecase mapping. Letters whose titlecase
/// differs from their uppercase come out in uppercase form: a leading `ß`
/// becomes `SS` and a leading `ǆ` becomes `Ǆ` (titlecase would give `Ss` and
/// `ǅ`). Runtime model ids are ASCII in practice.
pub fn display_name(model_id: &str) -> String {
    let mut out = String::with_capacity(model_id.len());
    let mut prev_cased = false;

    for c in model_id.chars() {
        let c = if c == ':' || c == '-' { ' ' } else { c };
        if c.is_lowercase() || c.is_uppercase() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }

    out
}

/// Whether the model id names a reasoning-specialized model.
pub fn is_reasoning_model(model_id: &str) -> bool {
    let lower = model_id.to_lowercase();
    REASONING_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Per-token cost fields. Always zero for local models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCost {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
}

/// Field-naming quirks of the target API dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCompat {
    pub supports_store: bool,
    pub supports_developer_role: bool,
    pub supports_reasoning_effort: bool,
    pub max_tokens_field: String,
}

impl Default for ModelCompat {
    // Ollama's OpenAI-compatible API takes classic max_tokens and has no
    // developer role or reasoning_effort.
    fn default() -> Self {
        Self {
            supports_store: false,
            supports_developer_role: false,
            supports_reasoning_effort: false,
            max_tokens_field: "max_tokens".to_string(),
        }
    }
}

/// One model as exposed to the gateway under `models.providers.<name>.models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderModelEntry {
    pub id: ModelId,
    pub name: String,
    pub api: String,
    pub reasoning: bool,
    pub input: Vec<String>,
    pub cost: ModelCost,
    pub context_window: u32,
    pub max_tokens: u32,
    pub compat: ModelCompat,
}

/// Fixed fields shared by every local provider entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTemplate {
    pub api: String,
    pub input: Vec<String>,
    pub cost: ModelCost,
    pub context_window: u32,
    pub max_tokens: u32,
    pub compat: ModelCompat,
}

impl Default for ModelTemplate {
    fn default() -> Self {
        Self {
            api: "openai-completions".to_string(),
            input: vec!["text".to_string()],
            cost: ModelCost::default(),
            context_window: 128_000,
            max_tokens: 4096,
            compat: ModelCompat::default(),
        }
    }
}

impl ModelTemplate {
    /// Builder method to set the context window.
    pub fn with_context_window(mut self, tokens: u32) -> Self {
        self.context_window = tokens;
        self
    }

    /// Builder method to set max output tokens.
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }

    /// Build the entry for a single model.
    pub fn entry_for(&self, id: &ModelId) -> ProviderModelEntry {
        ProviderModelEntry {
            id: id.clone(),
            name: display_name(id.as_str()),
            api: self.api.clone(),
            reasoning: is_reasoning_model(id.as_str()),
            input: self.input.clone(),
            cost: self.cost.clone(),
            context_window: self.context_window,
            max_tokens: self.max_tokens,
            compat: self.compat.clone(),
        }
    }

    /// Build entries for every model, in input order.
    pub fn build_provider_entries(&self, models: &[ModelId]) -> Vec<ProviderModelEntry> {
        models.iter().map(|id| self.entry_for(id)).collect()
    }
}

/// Alias record stored under `agents.defaults.models.<provider>/<model>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentModelAlias {
    pub alias: String,
}

impl AgentModelAlias {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
        }
    }
}

/// A model listed by the remote provider catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCatalogEntry {
    /// Fully-qualified key, e.g. `zai/glm-4.7`.
    pub key: String,

    /// Catalog display name. May be empty.
    #[serde(default)]
    pub name: String,
}

impl RemoteCatalogEntry {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    /// Alias to store: the catalog name, or the key without its namespace.
    pub fn alias(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        match self.key.split_once('/') {
            Some((_, rest)) => rest,
            None => &self.key,
        }
    }
}

/// Settings of the local-runtime provider section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalProvider {
    /// Provider name and alias namespace.
    pub name: String,

    /// `baseUrl` used when the document has none.
    pub default_base_url: String,

    /// Credential placeholder, always written.
    pub api_key: String,
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self {
            name: "ollama".to_string(),
            default_base_url: "http://host.docker.internal:11434/v1".to_string(),
            api_key: "ollama".to_string(),
        }
    }
}

impl LocalProvider {
    /// Alias key prefix owned by this provider (`ollama/`).
    pub fn namespace_prefix(&self) -> String {
        format!("{}/", self.name)
    }
}
