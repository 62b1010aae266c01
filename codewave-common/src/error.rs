//! Common error types for CodeWave

use thiserror::Error;

/// Common result type for CodeWave operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the CodeWave crates
///
/// The playback engine itself has no failure modes; errors only arise at
/// the loading boundary (article documents, configuration files).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Article document parse error (wraps serde_json::Error)
    #[error("Article parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
