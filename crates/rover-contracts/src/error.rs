//! Runtime error types for the rover tile server.
//!
//! All fallible operations in the workspace return `RoverResult<T>`.
//! A missing tile is never an error; it is `Ok(None)` from the tile source.

use thiserror::Error;

/// The unified error type for the rover crates.
#[derive(Debug, Error)]
pub enum RoverError {
    /// The tile archive could not be opened or a pooled connection could not
    /// be acquired.
    #[error("tile archive unavailable: {reason}")]
    ArchiveUnavailable { reason: String },

    /// A query against an open archive failed (corrupt file, wrong schema).
    #[error("tile archive query failed: {reason}")]
    ArchiveQuery { reason: String },

    /// A new archive could not be created.
    #[error("tile archive initialisation failed: {reason}")]
    ArchiveInit { reason: String },

    /// The shared rover state mutex was poisoned by a panicking holder.
    #[error("rover state lock poisoned: {reason}")]
    StateLockPoisoned { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The map style document does not exist on disk.
    #[error("style document unavailable: {reason}")]
    StyleUnavailable { reason: String },

    /// The map style document exists but is not a JSON object.
    #[error("style document malformed: {reason}")]
    StyleMalformed { reason: String },
}

/// Convenience alias used throughout the rover crates.
pub type RoverResult<T> = Result<T, RoverError>;
