//! Host error types

use thiserror::Error;

/// Faults raised by a host environment (browser or headless).
///
/// None of these reach the end user: callers recover locally, log a warning
/// and keep their in-memory state authoritative.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Persistent storage cannot be reached at all (disabled, sandboxed)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Reading a key failed
    #[error("Storage read failed for `{key}`: {reason}")]
    StorageRead { key: String, reason: String },

    /// Writing or removing a key failed (quota, private mode)
    #[error("Storage write failed for `{key}`: {reason}")]
    StorageWrite { key: String, reason: String },

    /// A selector matched nothing in the document
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The scroll API rejected the request
    #[error("Scroll failed: {0}")]
    Scroll(String),

    /// A stored payload could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
