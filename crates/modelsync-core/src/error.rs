//! Core domain errors.

use thiserror::Error;

/// Core domain errors for modelsync.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The document root is not a JSON object.
    #[error("Configuration root must be a JSON object")]
    NotAnObject,

    /// A subtree on the merge path exists but is not an object.
    #[error("Invalid configuration document: '{path}' must be an object")]
    InvalidSubtree { path: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
