//! Error types for the analysis pipeline.
//!
//! Four failure classes exist: invalid run input (fatal), a single document
//! failing to parse (the caller logs and drops that document), an external
//! service call failing (fatal for embedding/keyphrase/tagging, degradable
//! for summarization), and plain IO/JSON errors from loading or writing the
//! run files.

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during a document analysis run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or incomplete run input (missing keys, empty document list)
    #[error("Invalid input: {0}")]
    Input(String),

    /// A single document could not be opened or parsed
    #[error("Failed to process document '{filename}': {reason}")]
    Document {
        /// Filename of the offending document
        filename: String,
        /// Reason reported by the page source
        reason: String,
    },

    /// Embedding service call failed
    #[error("Embedding service error: {0}")]
    Embedding(String),

    /// Keyphrase extraction service call failed
    #[error("Keyphrase service error: {0}")]
    Keyphrase(String),

    /// Part-of-speech tagging service call failed
    #[error("Tagging service error: {0}")]
    Tagging(String),

    /// Summarization service call failed (callers degrade to cleaned text)
    #[error("Summarization service error: {0}")]
    Summarization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
