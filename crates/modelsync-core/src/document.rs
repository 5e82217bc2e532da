//! The gateway configuration document and its merge transforms.
//!
//! A [`ConfigDocument`] is parsed once, threaded by value through the
//! transforms below and serialized once. Keys outside the subtrees touched by
//! a transform keep their values and their position.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::ids::ModelId;
use crate::model::{display_name, AgentModelAlias, LocalProvider, ProviderModelEntry, RemoteCatalogEntry};

/// In-memory gateway configuration (`openclaw.json`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// Parse a document from JSON text. The root must be an object.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(CoreError::NotAnObject),
        }
    }

    /// Serialize with two-space indentation.
    pub fn to_pretty_string(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// `models.providers.<name>`, if present.
    pub fn provider(&self, name: &str) -> Option<&Value> {
        self.root.get("models")?.get("providers")?.get(name)
    }

    /// `agents.defaults.models`, if present and an object.
    pub fn agent_aliases(&self) -> Option<&Map<String, Value>> {
        self.root
            .get("agents")?
            .get("defaults")?
            .get("models")?
            .as_object()
    }

    /// Alias string stored for a fully-qualified model key.
    pub fn alias_for(&self, key: &str) -> Option<&str> {
        self.agent_aliases()?.get(key)?.get("alias")?.as_str()
    }

    /// Replace `models.providers.<name>` with the given entries.
    ///
    /// The existing `baseUrl` is kept when it is a non-empty string, otherwise
    /// the provider default is used. `apiKey` is always overwritten.
    pub fn merge_provider_section(
        mut self,
        provider: &LocalProvider,
        entries: &[ProviderModelEntry],
    ) -> Result<Self, CoreError> {
        let providers = object_at(&mut self.root, &["models", "providers"])?;

        let base_url = providers
            .get(&provider.name)
            .and_then(|section| section.get("baseUrl"))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .unwrap_or(&provider.default_base_url)
            .to_string();

        let mut section = Map::new();
        section.insert("baseUrl".to_string(), Value::String(base_url));
        section.insert("apiKey".to_string(), Value::String(provider.api_key.clone()));
        section.insert("models".to_string(), serde_json::to_value(entries)?);

        providers.insert(provider.name.clone(), Value::Object(section));
        Ok(self)
    }

    /// Rebuild the alias map for the local provider and add remote aliases.
    ///
    /// Every key under the provider's namespace is dropped and re-created from
    /// `models`. Remote entries are inserted or overwritten; remote keys
    /// missing from `remote` are left alone.
    pub fn merge_agent_aliases(
        mut self,
        provider: &LocalProvider,
        models: &[ModelId],
        remote: &[RemoteCatalogEntry],
    ) -> Result<Self, CoreError> {
        let prefix = provider.namespace_prefix();
        let aliases = object_at(&mut self.root, &["agents", "defaults", "models"])?;

        let existing = std::mem::take(aliases);
        let mut merged: Map<String, Value> = existing
            .into_iter()
            .filter(|(key, _)| !key.starts_with(&prefix))
            .collect();

        for id in models {
            let alias = AgentModelAlias::new(display_name(id.as_str()));
            merged.insert(id.qualified(&provider.name), serde_json::to_value(alias)?);
        }

        for entry in remote {
            let alias = AgentModelAlias::new(entry.alias());
            merged.insert(entry.key.clone(), serde_json::to_value(alias)?);
        }

        *aliases = merged;
        Ok(self)
    }

    /// Full local sync: provider section then aliases.
    pub fn reconcile(
        self,
        provider: &LocalProvider,
        entries: &[ProviderModelEntry],
        remote: &[RemoteCatalogEntry],
    ) -> Result<Self, CoreError> {
        let models: Vec<ModelId> = entries.iter().map(|e| e.id.clone()).collect();
        self.merge_provider_section(provider, entries)?
            .merge_agent_aliases(provider, &models, remote)
    }
}

/// Walk `path` from `root`, creating missing objects along the way.
fn object_at<'a>(
    root: &'a mut Map<String, Value>,
    path: &[&str],
) -> Result<&'a mut Map<String, Value>, CoreError> {
    let mut current = root;
    for (depth, key) in path.iter().enumerate() {
        let slot = current
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = slot.as_object_mut().ok_or_else(|| CoreError::InvalidSubtree {
            path: path[..=depth].join("."),
        })?;
    }
    Ok(current)
}
