//! Error types for pcache

use thiserror::Error;

/// Result type alias for pcache operations
pub type Result<T> = std::result::Result<T, PcacheError>;

/// Error types for pcache operations
#[derive(Error, Debug)]
pub enum PcacheError {
    /// Snapshot file exists but could not be parsed
    #[error("Cache snapshot '{path}' is corrupt: {reason}")]
    SnapshotCorrupt { path: String, reason: String },

    /// Target file could not be opened, read or stat'ed
    #[error("Cannot access file '{path}': {reason}")]
    FileAccess { path: String, reason: String },

    /// External command could not be launched or did not exit cleanly
    #[error("Command '{command}' failed: {reason}")]
    Execution { command: String, reason: String },

    /// Reading the list of file names failed
    #[error("Failed to read input: {0}")]
    InputStream(std::io::Error),

    /// Snapshot could not be written or removed
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
