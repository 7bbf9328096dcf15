//! Error types for the ecodata library.

use thiserror::Error;

/// Errors that can occur when fetching or transforming upstream data.
#[derive(Error, Debug)]
pub enum EcoError {
    /// Transport-level failure (connection, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status code.
    #[error("Upstream returned status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Upstream body could not be decoded into the expected shape.
    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error when reading local files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`EcoError`].
pub type Result<T> = std::result::Result<T, EcoError>;
