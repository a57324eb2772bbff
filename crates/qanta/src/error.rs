//! Common error types for QANTA Rust components.

use thiserror::Error;

/// Common error type for QANTA operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed row in a redirect file
    #[error("redirects line {line}: {message}")]
    Redirects { line: u64, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Resolution error
    #[error("resolution error: {0}")]
    Resolve(#[from] qanta_core::ResolveError),
}

/// Result type alias using QANTA Error.
pub type Result<T> = std::result::Result<T, Error>;
