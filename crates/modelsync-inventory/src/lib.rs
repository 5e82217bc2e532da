//! Inventory collection for modelsync
//!
//! This crate discovers which models are available to the gateway:
//! - the local runtime's model list, via its CLI with a containerized fallback
//! - per-model capabilities, via the runtime's `/api/show` endpoint
//! - the optional remote provider catalog, via the gateway CLI
//!
//! Every lookup degrades to an empty result instead of failing; callers decide
//! which empty results are fatal.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use modelsync_core::Blocklist;
//! use modelsync_inventory::{filter_tool_capable, LocalRuntime, OllamaClient};
//!
//! async fn collect() -> Result<(), Box<dyn std::error::Error>> {
//!     let models = LocalRuntime::default().list_local_models().await;
//!     let client = OllamaClient::new("http://127.0.0.1:11434", Duration::from_secs(10))?;
//!
//!     let outcome = filter_tool_capable(models, &Blocklist::default(), &client).await;
//!     println!("accepted: {:?}", outcome.accepted);
//!     Ok(())
//! }
//! ```

mod command;
mod error;
mod http;
mod local;
mod probe;
mod remote;

// Re-export main types
pub use command::{first_success, CommandStrategy};
pub use error::InventoryError;
pub use http::{OllamaClient, ShowResponse};
pub use local::{parse_model_table, LocalRuntime};
pub use probe::{filter_tool_capable, CapabilityProbe};
pub use remote::{parse_catalog, RemoteCatalog};
