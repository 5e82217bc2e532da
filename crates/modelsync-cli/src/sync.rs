//! The sync job: collect inventory, reconcile, write the config back.
//!
//! The config file is read before anything else and written last, so every
//! fatal error leaves it untouched.

use std::path::{Path, PathBuf};

use modelsync_core::filter::join_ids;
use modelsync_core::{ConfigDocument, CoreError, ModelId, RemoteCatalogEntry};
use modelsync_inventory::{
    filter_tool_capable, CapabilityProbe, InventoryError, LocalRuntime, OllamaClient, RemoteCatalog,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, ConfigError};

/// Errors that abort a sync with exit status 1.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("No ollama models found (run ollama list)")]
    NoLocalModels,

    #[error("No tool-capable Ollama models found after filtering")]
    NoToolCapableModels,

    #[error("Failed to merge configuration: {0}")]
    Merge(#[from] CoreError),

    #[error("Failed to create runtime client: {0}")]
    Client(#[from] InventoryError),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a successful sync did.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Local models written to the provider section.
    pub local: Vec<ModelId>,

    /// Remote catalog entries merged into the aliases.
    pub remote: Vec<RemoteCatalogEntry>,

    /// Serialized document that was (or, in dry-run mode, would be) written.
    pub rendered: String,

    /// Whether the file was written.
    pub written: bool,
}

impl SyncReport {
    /// Summary lines for stdout.
    pub fn summary(&self, remote_label: &str) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.remote.is_empty() {
            let keys: Vec<&str> = self.remote.iter().map(|e| e.key.as_str()).collect();
            lines.push(format!(
                "Synced {} {} models: {}",
                self.remote.len(),
                remote_label,
                keys.join(", ")
            ));
        }
        lines.push(format!(
            "Synced {} Ollama models: {}",
            self.local.len(),
            join_ids(&self.local)
        ));
        lines
    }
}

/// Read and parse the configuration document.
pub fn load_document(path: &Path) -> Result<ConfigDocument, SyncError> {
    let text = std::fs::read_to_string(path).map_err(|source| SyncError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    ConfigDocument::from_json_str(&text).map_err(|source| SyncError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite the configuration file with `rendered`.
pub fn store_document(path: &Path, rendered: &str) -> Result<(), SyncError> {
    std::fs::write(path, format!("{}\n", rendered)).map_err(|source| SyncError::WriteConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Run a sync against the real runtime and gateway CLIs.
pub async fn run(config: &Config) -> Result<SyncReport, SyncError> {
    let runtime = LocalRuntime::default().with_timeout(config.list_timeout());
    let client = OllamaClient::new(&config.ollama_api_url, config.capability_timeout())?;
    let catalog = config
        .remote_provider
        .as_deref()
        .map(|provider| RemoteCatalog::for_provider(provider).with_timeout(config.remote_timeout()));

    sync_with(config, &runtime, &client, catalog.as_ref()).await
}

/// Run a sync with explicit inventory sources.
pub async fn sync_with<P>(
    config: &Config,
    runtime: &LocalRuntime,
    probe: &P,
    catalog: Option<&RemoteCatalog>,
) -> Result<SyncReport, SyncError>
where
    P: CapabilityProbe + ?Sized,
{
    let document = load_document(&config.config_path)?;
    info!(path = %config.config_path.display(), "Loaded configuration");

    let all_models = runtime.list_local_models().await;
    if all_models.is_empty() {
        return Err(SyncError::NoLocalModels);
    }

    println!(
        "Found {} Ollama models, checking tool capability...",
        all_models.len()
    );
    let outcome = filter_tool_capable(all_models, &config.blocklist, probe).await;
    for line in outcome.diagnostics() {
        eprintln!("{}", line);
    }
    if !outcome.unverified.is_empty() {
        warn!(
            models = %join_ids(&outcome.unverified),
            "Capability lookup failed; models excluded until the runtime answers"
        );
    }
    if outcome.accepted.is_empty() {
        return Err(SyncError::NoToolCapableModels);
    }

    let entries = config.template.build_provider_entries(&outcome.accepted);
    let document = document.merge_provider_section(&config.provider, &entries)?;

    let remote = match catalog {
        Some(catalog) => catalog.fetch_remote_catalog().await,
        None => Vec::new(),
    };
    let document = document.merge_agent_aliases(&config.provider, &outcome.accepted, &remote)?;

    let rendered = document.to_pretty_string()?;
    if !config.dry_run {
        store_document(&config.config_path, &rendered)?;
        info!(path = %config.config_path.display(), "Wrote configuration");
    }

    Ok(SyncReport {
        local: outcome.accepted,
        remote,
        rendered,
        written: !config.dry_run,
    })
}
