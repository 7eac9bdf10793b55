//! Error types for the extractor.

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Invalid entry identifier.
    #[error("Invalid entry id: '{0}'. Expected a short alphanumeric id (e.g., DgIqVCc)")]
    InvalidEntryId(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream API returned a non-success status.
    #[error("Upstream returned status {status} for {endpoint}")]
    UpstreamStatus { endpoint: String, status: u16 },

    /// All retry attempts were exhausted.
    #[error("Retries exhausted after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Record serialization failed.
    ///
    /// This is the only failure mode of the extraction engine itself;
    /// malformed markup degrades to empty fields instead of erroring.
    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
