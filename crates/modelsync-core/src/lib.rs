//! modelsync Core Domain Types
//!
//! This crate contains pure domain types and transforms with no dependencies on:
//! - Subprocesses
//! - Network/HTTP
//! - File I/O
//!
//! Everything that touches the gateway configuration document lives here so it
//! can be exercised without a runtime or a config file on disk.

pub mod capability;
pub mod document;
pub mod error;
pub mod filter;
pub mod ids;
pub mod model;

// Re-export commonly used types
pub use capability::{CapabilityLookup, CapabilitySet, TOOLS_CAPABILITY};
pub use document::ConfigDocument;
pub use error::CoreError;
pub use filter::{Blocklist, FilterOutcome, Verdict};
pub use ids::ModelId;
pub use model::{
    display_name, AgentModelAlias, LocalProvider, ModelCompat, ModelCost, ModelTemplate,
    ProviderModelEntry, RemoteCatalogEntry,
};
