//! Error types for inventory collection.

use thiserror::Error;

/// Errors that can occur while collecting inventory.
///
/// None of these abort a sync on their own; they are logged and the lookup
/// falls through to the next strategy or to an empty result.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The program could not be started (usually not installed).
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program exited with a non-zero status.
    #[error("'{program}' exited with code {code}")]
    NonZeroExit { program: String, code: i32 },

    /// The program succeeded but printed nothing.
    #[error("'{program}' produced no output")]
    EmptyOutput { program: String },

    /// The program or request did not finish in time.
    #[error("'{target}' timed out after {secs}s")]
    Timeout { target: String, secs: u64 },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },
}
