//! Remote provider catalog, listed through the gateway CLI.

use std::time::Duration;

use modelsync_core::RemoteCatalogEntry;
use serde_json::Value;
use tracing::info;

use crate::command::{first_success, CommandStrategy};
use crate::error::InventoryError;

/// Lists the models a remote provider exposes to the gateway.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    namespace: String,
    strategies: Vec<CommandStrategy>,
    timeout: Duration,
}

impl Default for RemoteCatalog {
    fn default() -> Self {
        Self::for_provider("zai")
    }
}

impl RemoteCatalog {
    /// Catalog for `provider`: the host `openclaw` CLI first, then the CLI
    /// bundled in the `openclaw-gateway` container.
    pub fn for_provider(provider: &str) -> Self {
        let list_args = ["models", "list", "--all", "--provider", provider, "--json"];
        let host = CommandStrategy::new("openclaw").with_args(list_args);
        let container = CommandStrategy::new("docker")
            .with_args(["exec", "openclaw-gateway", "node", "dist/index.js"])
            .with_args(list_args);

        Self {
            namespace: provider.to_string(),
            strategies: vec![host, container],
            timeout: Duration::from_secs(20),
        }
    }

    /// Builder method to replace the invocation strategies.
    pub fn with_strategies(mut self, strategies: Vec<CommandStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Builder method to set the per-strategy timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn strategies(&self) -> &[CommandStrategy] {
        &self.strategies
    }

    /// Catalog entries under this namespace. Empty when every strategy fails.
    pub async fn fetch_remote_catalog(&self) -> Vec<RemoteCatalogEntry> {
        let namespace = self.namespace.as_str();
        let entries = first_success(&self.strategies, self.timeout, |stdout| {
            parse_catalog(stdout, namespace)
        })
        .await;

        match entries {
            Some(entries) => {
                info!(provider = %namespace, count = entries.len(), "Fetched remote catalog");
                entries
            }
            None => {
                info!(provider = %namespace, "Remote catalog unavailable, keeping existing aliases");
                Vec::new()
            }
        }
    }
}

/// Parse `models list --json` output.
///
/// Rows come from the top-level `models` array. `key` and `name` are trimmed
/// and only keys under `<namespace>/` are kept. Fails only on malformed JSON.
pub fn parse_catalog(stdout: &str, namespace: &str) -> Result<Vec<RemoteCatalogEntry>, InventoryError> {
    let data: Value = serde_json::from_str(stdout)?;
    let prefix = format!("{}/", namespace);

    let rows = data
        .get("models")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    Ok(rows
        .iter()
        .filter_map(|row| {
            let key = row.get("key").and_then(Value::as_str).unwrap_or("").trim();
            let name = row.get("name").and_then(Value::as_str).unwrap_or("").trim();
            key.starts_with(&prefix)
                .then(|| RemoteCatalogEntry::new(key, name))
        })
        .collect())
}
