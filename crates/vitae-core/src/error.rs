//! Error types for the vitae-core library.

use thiserror::Error;

/// Main error type for the vitae library.
#[derive(Error, Debug)]
pub enum VitaeError {
    /// Document loading or text extraction error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning an upload into text.
///
/// Both kinds are recoverable at the call site: the caller falls back to a
/// record derived from the filename instead of aborting the upload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The declared media type is not handled by the loader.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The document could not be read (malformed, encrypted, no pages).
    #[error("failed to extract text: {0}")]
    ExtractionFailed(String),
}

/// Result type for the vitae library.
pub type Result<T> = std::result::Result<T, VitaeError>;
